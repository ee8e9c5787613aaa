//! Property-based tests for FSM construction and dispatch.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated declarations and event sequences.

use proptest::prelude::*;
use region_fsm::core::{Action, EventSpec, Region, State, Transition};
use region_fsm::diagnostics::{CollectingSink, Diagnostic};
use region_fsm::machine::{Dispatch, Fsm, FsmConfig};
use serde_json::{json, Value};
use std::collections::HashSet;

const NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];
const EVENTS: [&str; 3] = ["tap", "hold", "tick"];

prop_compose! {
    fn arbitrary_name()(index in 0..NAMES.len()) -> &'static str {
        NAMES[index]
    }
}

prop_compose! {
    fn arbitrary_event()(index in 0..EVENTS.len()) -> &'static str {
        EVENTS[index]
    }
}

prop_compose! {
    fn arbitrary_transition()(event in arbitrary_event(), target in arbitrary_name()) -> Value {
        json!({
            "event": { "type": event },
            "actions": [{ "kind": "setContent", "region": "log", "value": format!("{event}->{target}") }],
            "target": target
        })
    }
}

prop_compose! {
    fn arbitrary_state()(
        name in arbitrary_name(),
        transitions in prop::collection::vec(arbitrary_transition(), 0..4)
    ) -> Value {
        json!({ "name": name, "transitions": transitions })
    }
}

fn load(states: &[Value]) -> (Fsm, CollectingSink) {
    let sink = CollectingSink::new();
    let fsm = Fsm::from_value(
        &json!({ "regions": [{ "name": "log" }], "states": states }),
        None,
        &FsmConfig::default(),
        &sink,
    );
    (fsm, sink)
}

fn declared_names(states: &[Value]) -> Vec<String> {
    states
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

/// The generated states in order, keeping only the first of each name.
fn first_declared(states: &[Value]) -> Vec<&Value> {
    let mut seen = HashSet::new();
    states
        .iter()
        .filter(|s| seen.insert(s["name"].as_str().unwrap().to_string()))
        .collect()
}

/// Target of the first transition of state `name` listening for `event`.
fn first_match(declared: &[&Value], name: &str, event: &str) -> Option<String> {
    let state = declared.iter().find(|s| s["name"] == name)?;
    state["transitions"]
        .as_array()?
        .iter()
        .find(|t| t["event"]["type"] == event)
        .map(|t| t["target"].as_str().unwrap().to_string())
}

proptest! {
    #[test]
    fn start_state_is_first_declared(states in prop::collection::vec(arbitrary_state(), 1..8)) {
        let (fsm, _) = load(&states);
        let first = declared_names(&states).remove(0);

        prop_assert_eq!(fsm.start_state().map(|s| s.name().to_string()), Some(first.clone()));
        prop_assert_eq!(fsm.current_state().map(|s| s.name().to_string()), Some(first));
    }

    #[test]
    fn one_state_survives_per_name(states in prop::collection::vec(arbitrary_state(), 0..10)) {
        let (fsm, sink) = load(&states);
        let declared = declared_names(&states);

        let mut seen = HashSet::new();
        let expected: Vec<_> = declared.iter().filter(|n| seen.insert(n.as_str())).cloned().collect();
        let kept: Vec<_> = fsm.states().iter().map(|s| s.name().to_string()).collect();
        prop_assert_eq!(&kept, &expected);

        let duplicates = sink
            .diagnostics()
            .into_iter()
            .filter(|d| matches!(d, Diagnostic::DuplicateState { .. }))
            .count();
        prop_assert_eq!(duplicates, declared.len() - expected.len());
    }

    #[test]
    fn dispatch_follows_first_matching_transition(
        states in prop::collection::vec(arbitrary_state(), 1..6),
        events in prop::collection::vec(arbitrary_event(), 0..12)
    ) {
        let (mut fsm, _) = load(&states);
        let declared = first_declared(&states);
        let mut current = declared.first().map(|s| s["name"].as_str().unwrap().to_string());
        let mut content: Option<String> = None;

        for event in events {
            let matched = current.as_ref().and_then(|name| first_match(&declared, name, event));
            let result = fsm.act_on_event(event, None);

            match (current.is_some(), matched) {
                (false, _) => {
                    prop_assert_eq!(result, Dispatch::NoCurrentState);
                }
                (true, None) => {
                    prop_assert!(!result.fired());
                }
                (true, Some(target)) => {
                    prop_assert!(result.fired());
                    content = Some(format!("{event}->{target}"));
                    let known = declared.iter().any(|s| s["name"] == target.as_str());
                    current = if known { Some(target) } else { None };
                }
            }

            prop_assert_eq!(fsm.current_state().map(|s| s.name().to_string()), current.clone());
            prop_assert_eq!(
                fsm.region_by_name("log").and_then(|r| r.content()).map(str::to_string),
                content.clone()
            );
        }
    }

    #[test]
    fn reset_always_restores_start(
        states in prop::collection::vec(arbitrary_state(), 1..6),
        events in prop::collection::vec(arbitrary_event(), 0..12)
    ) {
        let (mut fsm, _) = load(&states);
        for event in &events {
            fsm.act_on_event(event, None);
        }
        let content = fsm.region_by_name("log").and_then(|r| r.content()).map(str::to_string);

        fsm.reset();

        prop_assert_eq!(fsm.current_state_id(), fsm.start_state_id());
        prop_assert!(fsm.history().is_empty());
        prop_assert_eq!(
            fsm.region_by_name("log").and_then(|r| r.content()).map(str::to_string),
            content
        );
    }

    #[test]
    fn forward_references_bind_regardless_of_order(len in 1..8usize) {
        // Each state targets the one declared after it; the last targets the first.
        let states: Vec<State> = (0..len)
            .map(|i| {
                State::new(format!("S{i}")).with_transition(
                    Transition::new(EventSpec::new("next"))
                        .with_action(Action::set_content("log", format!("S{i}")))
                        .with_target(format!("S{}", (i + 1) % len)),
                )
            })
            .collect();

        let sink = CollectingSink::new();
        let mut fsm = Fsm::from_parts(
            vec![Region::new("log")],
            states,
            None,
            &FsmConfig::default(),
            &sink,
        );
        prop_assert!(sink.is_empty());

        for step in 1..=len {
            let result = fsm.act_on_event("next", None);
            let is_transition = matches!(result, Dispatch::Transitioned { .. });
            prop_assert!(is_transition);
            let expected = format!("S{}", step % len);
            prop_assert_eq!(fsm.current_state().map(|s| s.name()), Some(expected.as_str()));
        }
    }
}
