//! The region FSM: construction, binding, dispatch and damage.

use crate::core::{
    same_parent, Damage, DamageLink, ParentHandle, Region, RegionId, State, StateHistory, StateId,
    SymbolTable, TransitionRecord,
};
use crate::decl::{FsmDecl, RegionDecl, StateDecl};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::machine::binding::{bind_states, check_bindings, BindingError};
use crate::machine::config::FsmConfig;
use chrono::Utc;
use serde_json::Value;
use std::rc::{Rc, Weak};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single [`Fsm::act_on_event`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A transition fired and the FSM moved to `to`
    Transitioned { from: StateId, to: StateId },

    /// A transition fired but its target never resolved; the FSM now has
    /// no current state until [`Fsm::reset`]
    Dead { from: StateId },

    /// Nothing in the current state matched
    Ignored { state: StateId },

    /// The FSM has no current state
    NoCurrentState,
}

impl Dispatch {
    /// Whether a transition was taken (and its actions ran).
    pub fn fired(&self) -> bool {
        matches!(self, Self::Transitioned { .. } | Self::Dead { .. })
    }
}

/// A finite-state machine driving a set of regions.
///
/// The FSM owns its regions and states. Every cross reference between them
/// is bound once, when the FSM is built. Dispatch is synchronous and takes
/// `&mut self`, so actions can never re-enter the FSM that runs them.
///
/// The damage link is reference counted without atomics; an `Fsm` is not
/// `Send`, and hosts delivering events from several threads must serialize
/// access themselves.
pub struct Fsm {
    regions: Vec<Region>,
    states: Vec<State>,
    region_table: SymbolTable<RegionId>,
    state_table: SymbolTable<StateId>,
    current: Option<StateId>,
    link: Rc<DamageLink>,
    history: StateHistory,
    config: FsmConfig,
}

impl Fsm {
    /// Load an FSM from raw JSON-shaped data with `regions` and `states`
    /// arrays.
    ///
    /// Problems are reported to `sink` and the offending part is skipped:
    /// a non-array list counts as empty, a malformed or duplicate entry is
    /// dropped. This never fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use region_fsm::diagnostics::CollectingSink;
    /// use region_fsm::machine::{Fsm, FsmConfig};
    /// use serde_json::json;
    ///
    /// let sink = CollectingSink::new();
    /// let fsm = Fsm::from_value(
    ///     &json!({
    ///         "regions": [],
    ///         "states": [
    ///             { "name": "Idle", "transitions": [{ "event": { "type": "Start" }, "target": "Active" }] },
    ///             { "name": "Active" }
    ///         ]
    ///     }),
    ///     None,
    ///     &FsmConfig::default(),
    ///     &sink,
    /// );
    ///
    /// assert!(sink.is_empty());
    /// assert_eq!(fsm.current_state().map(|s| s.name()), Some("Idle"));
    /// ```
    pub fn from_value(
        value: &Value,
        parent: Option<ParentHandle>,
        config: &FsmConfig,
        sink: &dyn DiagnosticSink,
    ) -> Self {
        let regions: Vec<Region> = match value.get("regions") {
            Some(Value::Array(entries)) => {
                parse_entries::<RegionDecl, _>(entries, sink, |index, message| {
                    Diagnostic::MalformedRegion { index, message }
                })
                .into_iter()
                .map(Region::from)
                .collect()
            }
            _ => {
                sink.report(&Diagnostic::RegionsNotArray);
                Vec::new()
            }
        };

        let (states, states_listed) = match value.get("states") {
            Some(Value::Array(entries)) => {
                let states: Vec<State> =
                    parse_entries::<StateDecl, _>(entries, sink, |index, message| {
                        Diagnostic::MalformedState { index, message }
                    })
                    .into_iter()
                    .map(State::from)
                    .collect();
                (states, true)
            }
            _ => {
                sink.report(&Diagnostic::StatesNotArray);
                (Vec::new(), false)
            }
        };

        Self::assemble(regions, states, states_listed, parent, config, sink)
    }

    /// Build an FSM from a typed declaration.
    pub fn from_decl(
        decl: FsmDecl,
        parent: Option<ParentHandle>,
        config: &FsmConfig,
        sink: &dyn DiagnosticSink,
    ) -> Self {
        let regions = decl.regions.into_iter().map(Region::from).collect();
        let states = decl.states.into_iter().map(State::from).collect();
        Self::assemble(regions, states, true, parent, config, sink)
    }

    /// Build an FSM from already constructed regions and states.
    ///
    /// The same rules as for declarations apply: duplicate names are
    /// reported and dropped, an empty state list is reported.
    pub fn from_parts(
        regions: Vec<Region>,
        states: Vec<State>,
        parent: Option<ParentHandle>,
        config: &FsmConfig,
        sink: &dyn DiagnosticSink,
    ) -> Self {
        Self::assemble(regions, states, true, parent, config, sink)
    }

    fn assemble(
        regions: Vec<Region>,
        states: Vec<State>,
        states_listed: bool,
        parent: Option<ParentHandle>,
        config: &FsmConfig,
        sink: &dyn DiagnosticSink,
    ) -> Self {
        let (regions, region_table) = dedupe(
            regions,
            Region::name,
            RegionId,
            |name| Diagnostic::DuplicateRegion { name },
            sink,
        );
        let (states, state_table) = dedupe(
            states,
            State::name,
            StateId,
            |name| Diagnostic::DuplicateState { name },
            sink,
        );

        if states_listed && states.is_empty() {
            sink.report(&Diagnostic::NoStates);
        }

        let link = Rc::new(DamageLink::default());
        link.replace_parent(parent);

        let mut fsm = Self {
            regions,
            states,
            region_table,
            state_table,
            current: None,
            link,
            history: StateHistory::with_limit(config.history_limit),
            config: config.clone(),
        };
        fsm.finalize(sink);
        fsm
    }

    /// Bind every name to its object and attach regions to this FSM.
    ///
    /// Runs exactly once, from the constructors.
    fn finalize(&mut self, sink: &dyn DiagnosticSink) {
        bind_states(&mut self.states, &self.state_table, &self.region_table);

        let weak = Rc::downgrade(&self.link);
        let link: ParentHandle = weak;
        for region in &mut self.regions {
            region.attach(link.clone());
        }

        self.current = self.start_state_id();

        if let Validation::Failure(errors) = self.check_bindings() {
            tracing::debug!(unresolved = errors.len(), "FSM has unresolved references");
            if self.config.report_unresolved {
                for error in errors.iter() {
                    sink.report(&Diagnostic::from(error.clone()));
                }
            }
        }

        tracing::debug!(
            states = self.states.len(),
            regions = self.regions.len(),
            start = ?self.current_state().map(State::name),
            "FSM finalized"
        );
    }

    /// Re-check every reference, collecting ALL that did not resolve.
    ///
    /// Unresolved references are inert at dispatch time; callers that want
    /// them to be hard errors can reject the FSM on failure here.
    pub fn check_bindings(&self) -> Validation<(), NonEmptyVec<BindingError>> {
        check_bindings(&self.states)
    }

    /// Deliver one event.
    ///
    /// Scans the current state's transitions in declared order and takes the
    /// first whose event spec matches `(event_type, region)`. Its actions
    /// run in order, then the FSM moves to its target. A target that never
    /// resolved leaves the FSM with no current state; later events are
    /// no-ops until [`reset`](Self::reset).
    pub fn act_on_event(&mut self, event_type: &str, region: Option<RegionId>) -> Dispatch {
        let Some(from) = self.current else {
            tracing::trace!(event_type, "Event ignored, FSM has no current state");
            return Dispatch::NoCurrentState;
        };

        let state = &self.states[from.index()];
        let Some(transition) = state.find_transition(event_type, region) else {
            tracing::trace!(event_type, state = state.name(), "No transition matched");
            return Dispatch::Ignored { state: from };
        };

        for action in transition.actions() {
            action.execute(event_type, region, &mut self.regions);
        }

        let target = transition.target_id();
        let record = TransitionRecord {
            from: state.name().to_string(),
            to: target.map(|id| self.states[id.index()].name().to_string()),
            event_type: event_type.to_string(),
            region: region
                .and_then(|id| self.regions.get(id.index()))
                .map(|r| r.name().to_string()),
            timestamp: Utc::now(),
        };
        tracing::debug!(
            event_type,
            from = %record.from,
            to = ?record.to,
            "Transition taken"
        );

        self.history.push(record);
        self.current = target;

        match target {
            Some(to) => Dispatch::Transitioned { from, to },
            None => Dispatch::Dead { from },
        }
    }

    /// Deliver an event addressed by region name.
    ///
    /// An unknown name is delivered with no region, so only transitions
    /// without a region requirement can match.
    pub fn act_on_named_event(&mut self, event_type: &str, region: Option<&str>) -> Dispatch {
        let region = region.and_then(|name| self.region_id(name));
        self.act_on_event(event_type, region)
    }

    /// Return to the start state.
    ///
    /// Regions keep their content; no action runs and nothing is damaged.
    pub fn reset(&mut self) {
        self.current = self.start_state_id();
        self.history.clear();
    }

    /// Forward damage to the parent, if any. No local state changes.
    pub fn damage(&self) {
        self.link.damage();
    }

    pub fn parent(&self) -> Option<ParentHandle> {
        self.link.parent()
    }

    /// Replace the parent.
    ///
    /// Assigning the handle already held does nothing. Otherwise the old
    /// parent is damaged (something is leaving it), then the new parent
    /// (something is arriving).
    pub fn set_parent(&mut self, parent: Option<ParentHandle>) {
        let old = self.link.parent();
        if same_parent(&old, &parent) {
            return;
        }

        if let Some(old) = old.as_ref().and_then(Weak::upgrade) {
            old.damage();
        }
        self.link.replace_parent(parent.clone());
        if let Some(new) = parent.as_ref().and_then(Weak::upgrade) {
            new.damage();
        }
    }

    /// Start state: the first surviving declared state.
    pub fn start_state_id(&self) -> Option<StateId> {
        if self.states.is_empty() {
            None
        } else {
            Some(StateId(0))
        }
    }

    pub fn start_state(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn current_state_id(&self) -> Option<StateId> {
        self.current
    }

    pub fn current_state(&self) -> Option<&State> {
        self.current.map(|id| &self.states[id.index()])
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_table.get(name).copied()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    /// Mutable access for the host, e.g. to update content between events.
    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.index())
    }

    pub fn region_id(&self, name: &str) -> Option<RegionId> {
        self.region_table.get(name).copied()
    }

    pub fn region_by_name(&self, name: &str) -> Option<&Region> {
        self.region_id(name).and_then(|id| self.region(id))
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn config(&self) -> &FsmConfig {
        &self.config
    }
}

impl Damage for Fsm {
    fn damage(&self) {
        Fsm::damage(self);
    }
}

/// Deserialize each entry, reporting and skipping the ones that fail.
fn parse_entries<D, F>(entries: &[Value], sink: &dyn DiagnosticSink, malformed: F) -> Vec<D>
where
    D: serde::de::DeserializeOwned,
    F: Fn(usize, String) -> Diagnostic,
{
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<D>(entry.clone()) {
            Ok(decl) => Some(decl),
            Err(e) => {
                sink.report(&malformed(index, e.to_string()));
                None
            }
        })
        .collect()
}

/// Keep the first item per name, reporting every later duplicate.
fn dedupe<T, I, N, W, F>(
    items: Vec<T>,
    name: N,
    wrap: W,
    duplicate: F,
    sink: &dyn DiagnosticSink,
) -> (Vec<T>, SymbolTable<I>)
where
    N: Fn(&T) -> &str,
    W: Fn(usize) -> I,
    F: Fn(String) -> Diagnostic,
{
    let mut kept = Vec::with_capacity(items.len());
    let mut table = SymbolTable::new();

    for item in items {
        let key = name(&item);
        if table.contains_key(key) {
            sink.report(&duplicate(key.to_string()));
            continue;
        }
        table.insert(key.to_string(), wrap(kept.len()));
        kept.push(item);
    }

    (kept, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parent_handle, Action, EventSpec, Transition};
    use crate::diagnostics::CollectingSink;
    use crate::machine::config::DEFAULT_HISTORY_LIMIT;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Root {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        hits: Cell<usize>,
    }

    impl Damage for Root {
        fn damage(&self) {
            self.hits.set(self.hits.get() + 1);
            self.log.borrow_mut().push(self.name);
        }
    }

    fn load(value: Value) -> (Fsm, CollectingSink) {
        let sink = CollectingSink::new();
        let fsm = Fsm::from_value(&value, None, &FsmConfig::default(), &sink);
        (fsm, sink)
    }

    fn idle_active() -> Value {
        json!({
            "regions": [{ "name": "lamp", "content": "off.png" }],
            "states": [
                {
                    "name": "Idle",
                    "transitions": [{
                        "event": { "type": "Start" },
                        "actions": [{ "kind": "setContent", "region": "lamp", "value": "on.png" }],
                        "target": "Active"
                    }]
                },
                {
                    "name": "Active",
                    "transitions": [{ "event": { "type": "Stop" }, "target": "Idle" }]
                }
            ]
        })
    }

    #[test]
    fn start_and_current_are_first_state() {
        let (fsm, sink) = load(idle_active());

        assert!(sink.is_empty());
        assert_eq!(fsm.start_state_id(), Some(StateId(0)));
        assert_eq!(fsm.current_state_id(), Some(StateId(0)));
        assert_eq!(fsm.start_state().map(State::name), Some("Idle"));
    }

    #[test]
    fn non_array_lists_are_reported_and_treated_as_empty() {
        let (fsm, sink) = load(json!({ "regions": "lamp", "states": { "name": "Idle" } }));

        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::RegionsNotArray, Diagnostic::StatesNotArray]
        );
        assert!(fsm.regions().is_empty());
        assert!(fsm.states().is_empty());
        assert!(fsm.current_state().is_none());
    }

    #[test]
    fn missing_lists_are_not_arrays() {
        let (_, sink) = load(json!(null));
        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::RegionsNotArray, Diagnostic::StatesNotArray]
        );
    }

    #[test]
    fn empty_state_list_is_reported() {
        let (mut fsm, sink) = load(json!({ "regions": [], "states": [] }));

        assert_eq!(sink.diagnostics(), vec![Diagnostic::NoStates]);
        assert_eq!(fsm.act_on_event("Start", None), Dispatch::NoCurrentState);
        fsm.reset();
        assert!(fsm.current_state().is_none());
    }

    #[test]
    fn duplicates_are_dropped_and_reported() {
        let (fsm, sink) = load(json!({
            "regions": [{ "name": "lamp" }, { "name": "lamp", "content": "x" }],
            "states": [
                { "name": "Idle", "transitions": [{ "event": { "type": "a" }, "target": "Idle" }] },
                { "name": "Idle" },
                { "name": "Busy" },
                { "name": "Idle" }
            ]
        }));

        assert_eq!(
            sink.diagnostics(),
            vec![
                Diagnostic::DuplicateRegion { name: "lamp".to_string() },
                Diagnostic::DuplicateState { name: "Idle".to_string() },
                Diagnostic::DuplicateState { name: "Idle".to_string() },
            ]
        );
        assert_eq!(fsm.regions().len(), 1);
        assert_eq!(fsm.region_by_name("lamp").unwrap().content(), None);

        let names: Vec<_> = fsm.states().iter().map(State::name).collect();
        assert_eq!(names, vec!["Idle", "Busy"]);
        assert_eq!(fsm.states()[0].transitions().len(), 1);
        assert_eq!(fsm.state_id("Busy"), Some(StateId(1)));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let (fsm, sink) = load(json!({
            "regions": [{ "content": "no name" }, { "name": "lamp" }],
            "states": [42, { "name": "Idle" }]
        }));

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(diagnostics[0], Diagnostic::MalformedRegion { index: 0, .. }));
        assert!(matches!(diagnostics[1], Diagnostic::MalformedState { index: 0, .. }));
        assert_eq!(fsm.regions().len(), 1);
        assert_eq!(fsm.current_state().map(State::name), Some("Idle"));
    }

    #[test]
    fn only_malformed_states_leave_no_start_state() {
        let (fsm, sink) = load(json!({ "regions": [], "states": [{ "label": "Idle" }] }));

        let diagnostics = sink.diagnostics();
        assert!(matches!(diagnostics[0], Diagnostic::MalformedState { .. }));
        assert_eq!(diagnostics[1], Diagnostic::NoStates);
        assert!(fsm.current_state().is_none());
    }

    #[test]
    fn forward_references_resolve() {
        let (fsm, _) = load(json!({
            "regions": [],
            "states": [
                { "name": "A", "transitions": [{ "event": { "type": "go" }, "target": "C" }] },
                { "name": "B" },
                { "name": "C" }
            ]
        }));

        assert_eq!(fsm.states()[0].transitions()[0].target_id(), Some(StateId(2)));
        assert!(fsm.check_bindings().is_success());
    }

    #[test]
    fn regions_are_attached_to_the_fsm() {
        let (fsm, _) = load(idle_active());
        assert!(fsm.regions().iter().all(Region::is_attached));
    }

    #[test]
    fn dispatch_runs_actions_and_moves() {
        let (mut fsm, _) = load(idle_active());

        let result = fsm.act_on_event("Start", None);

        assert_eq!(
            result,
            Dispatch::Transitioned {
                from: StateId(0),
                to: StateId(1)
            }
        );
        assert!(result.fired());
        assert_eq!(fsm.current_state().map(State::name), Some("Active"));
        assert_eq!(fsm.region_by_name("lamp").unwrap().content(), Some("on.png"));
    }

    #[test]
    fn unmatched_event_changes_nothing() {
        let (mut fsm, _) = load(idle_active());

        let result = fsm.act_on_event("Stop", None);

        assert_eq!(result, Dispatch::Ignored { state: StateId(0) });
        assert!(!result.fired());
        assert_eq!(fsm.region_by_name("lamp").unwrap().content(), Some("off.png"));
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn first_match_wins() {
        let sink = CollectingSink::new();
        let mut fsm = Fsm::from_parts(
            vec![Region::new("a"), Region::new("b")],
            vec![
                State::new("S")
                    .with_transition(
                        Transition::new(EventSpec::new("go"))
                            .with_action(Action::set_content("a", "first"))
                            .with_target("T1"),
                    )
                    .with_transition(
                        Transition::new(EventSpec::new("go"))
                            .with_action(Action::set_content("b", "second"))
                            .with_target("T2"),
                    ),
                State::new("T1"),
                State::new("T2"),
            ],
            None,
            &FsmConfig::default(),
            &sink,
        );

        fsm.act_on_event("go", None);

        assert_eq!(fsm.current_state().map(State::name), Some("T1"));
        assert_eq!(fsm.region_by_name("a").unwrap().content(), Some("first"));
        assert_eq!(fsm.region_by_name("b").unwrap().content(), None);
    }

    #[test]
    fn region_specific_transition_needs_that_region() {
        let sink = CollectingSink::new();
        let mut fsm = Fsm::from_parts(
            vec![Region::new("ok"), Region::new("cancel")],
            vec![
                State::new("Dialog")
                    .with_transition(
                        Transition::new(EventSpec::for_region("click", "ok")).with_target("Accepted"),
                    )
                    .with_transition(
                        Transition::new(EventSpec::new("click")).with_target("Dismissed"),
                    ),
                State::new("Accepted"),
                State::new("Dismissed"),
            ],
            None,
            &FsmConfig::default(),
            &sink,
        );

        fsm.act_on_named_event("click", Some("cancel"));
        assert_eq!(fsm.current_state().map(State::name), Some("Dismissed"));

        fsm.reset();
        fsm.act_on_named_event("click", Some("ok"));
        assert_eq!(fsm.current_state().map(State::name), Some("Accepted"));

        fsm.reset();
        fsm.act_on_named_event("click", Some("nope"));
        assert_eq!(fsm.current_state().map(State::name), Some("Dismissed"));
    }

    #[test]
    fn unresolved_target_leaves_no_current_state() {
        let (mut fsm, sink) = load(json!({
            "regions": [],
            "states": [
                { "name": "Idle", "transitions": [{ "event": { "type": "jump" }, "target": "Void" }] }
            ]
        }));

        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::Unresolved(BindingError::UnknownTarget {
                state: "Idle".to_string(),
                transition: 0,
                name: "Void".to_string(),
            })]
        );

        assert_eq!(fsm.act_on_event("jump", None), Dispatch::Dead { from: StateId(0) });
        assert!(fsm.current_state().is_none());
        assert_eq!(fsm.act_on_event("jump", None), Dispatch::NoCurrentState);
        assert!(fsm.history().transitions()[0].is_dead());

        fsm.reset();
        assert_eq!(fsm.current_state().map(State::name), Some("Idle"));
    }

    #[test]
    fn quiet_config_binds_without_reporting() {
        let sink = CollectingSink::new();
        let fsm = Fsm::from_value(
            &json!({
                "regions": [],
                "states": [{
                    "name": "Idle",
                    "transitions": [{
                        "event": { "type": "tap", "region": "ghost" },
                        "actions": [{ "kind": "damage", "region": "ghost" }],
                        "target": "Idle"
                    }]
                }]
            }),
            None,
            &FsmConfig::quiet(),
            &sink,
        );

        assert!(sink.is_empty());
        match fsm.check_bindings() {
            Validation::Failure(errors) => assert_eq!(errors.len(), 2),
            Validation::Success(_) => panic!("Expected unresolved regions"),
        }
    }

    #[test]
    fn reset_restores_start_without_touching_regions() {
        let root = Rc::new(Root::default());
        let sink = CollectingSink::new();
        let mut fsm = Fsm::from_value(
            &idle_active(),
            Some(parent_handle(&root)),
            &FsmConfig::default(),
            &sink,
        );

        fsm.act_on_event("Start", None);
        let hits = root.hits.get();
        assert_eq!(hits, 1);

        fsm.reset();

        assert_eq!(fsm.current_state().map(State::name), Some("Idle"));
        assert_eq!(fsm.region_by_name("lamp").unwrap().content(), Some("on.png"));
        assert_eq!(root.hits.get(), hits);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn history_records_taken_transitions() {
        let (mut fsm, _) = load(idle_active());

        fsm.act_on_event("Start", None);
        fsm.act_on_event("Bogus", None);
        fsm.act_on_event("Stop", None);

        assert_eq!(
            fsm.history().get_path(),
            vec![Some("Idle"), Some("Active"), Some("Idle")]
        );
        assert_eq!(fsm.history().transitions()[1].event_type, "Stop");
    }

    #[test]
    fn history_names_event_region() {
        let (mut fsm, _) = load(idle_active());
        let lamp = fsm.region_id("lamp");

        fsm.act_on_event("Start", lamp);

        assert_eq!(fsm.history().transitions()[0].region.as_deref(), Some("lamp"));
    }

    #[test]
    fn history_keeps_only_configured_limit() {
        let sink = CollectingSink::new();
        let config = FsmConfig::default().with_history_limit(Some(3));
        let mut fsm = Fsm::from_value(&idle_active(), None, &config, &sink);

        for _ in 0..50 {
            fsm.act_on_event("Start", None);
            fsm.act_on_event("Stop", None);
        }

        assert_eq!(fsm.history().len(), 3);
        assert_eq!(fsm.history().limit(), Some(3));
        assert_eq!(fsm.history().transitions()[2].event_type, "Stop");

        fsm.reset();
        assert!(fsm.history().is_empty());
        assert_eq!(fsm.history().limit(), Some(3));
    }

    #[test]
    fn default_history_is_bounded() {
        let (mut fsm, _) = load(idle_active());

        for _ in 0..DEFAULT_HISTORY_LIMIT {
            fsm.act_on_event("Start", None);
            fsm.act_on_event("Stop", None);
        }

        assert_eq!(fsm.history().len(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn cloned_region_does_not_damage_parent() {
        let root = Rc::new(Root::default());
        let sink = CollectingSink::new();
        let fsm = Fsm::from_value(
            &idle_active(),
            Some(parent_handle(&root)),
            &FsmConfig::default(),
            &sink,
        );

        let mut copy = fsm.region_by_name("lamp").unwrap().clone();
        copy.set_content(Some("elsewhere.png".to_string()));
        copy.damage();

        assert_eq!(root.hits.get(), 0);
        assert_eq!(fsm.region_by_name("lamp").unwrap().content(), Some("off.png"));
    }

    #[test]
    fn region_damage_bubbles_through_fsm() {
        let root = Rc::new(Root::default());
        let sink = CollectingSink::new();
        let mut fsm = Fsm::from_value(
            &idle_active(),
            Some(parent_handle(&root)),
            &FsmConfig::default(),
            &sink,
        );

        let lamp = fsm.region_id("lamp").unwrap();
        fsm.region_mut(lamp).unwrap().set_content(Some("dim.png".to_string()));
        fsm.region(lamp).unwrap().damage();
        fsm.damage();

        assert_eq!(root.hits.get(), 3);
    }

    #[test]
    fn damage_without_parent_is_silent() {
        let (fsm, _) = load(idle_active());
        assert!(fsm.parent().is_none());
        fsm.damage();
    }

    #[test]
    fn set_parent_to_same_value_is_silent() {
        let root = Rc::new(Root::default());
        let (mut fsm, _) = load(idle_active());

        fsm.set_parent(None);
        fsm.set_parent(Some(parent_handle(&root)));
        assert_eq!(root.hits.get(), 1);

        fsm.set_parent(Some(parent_handle(&root)));
        assert_eq!(root.hits.get(), 1);
    }

    #[test]
    fn set_parent_damages_old_then_new() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let old = Rc::new(Root {
            name: "old",
            log: Rc::clone(&log),
            hits: Cell::new(0),
        });
        let new = Rc::new(Root {
            name: "new",
            log: Rc::clone(&log),
            hits: Cell::new(0),
        });
        let sink = CollectingSink::new();
        let mut fsm = Fsm::from_value(
            &idle_active(),
            Some(parent_handle(&old)),
            &FsmConfig::default(),
            &sink,
        );

        fsm.set_parent(Some(parent_handle(&new)));

        assert_eq!(*log.borrow(), vec!["old", "new"]);
        assert_eq!(old.hits.get(), 1);
        assert_eq!(new.hits.get(), 1);

        // Regions now bubble to the new parent only.
        fsm.region_by_name("lamp").unwrap().damage();
        assert_eq!(old.hits.get(), 1);
        assert_eq!(new.hits.get(), 2);

        fsm.set_parent(None);
        assert_eq!(new.hits.get(), 3);
        assert!(fsm.parent().is_none());
    }

    #[test]
    fn fsm_can_parent_another_fsm() {
        let root = Rc::new(Root::default());
        let sink = CollectingSink::new();
        let outer = Rc::new(Fsm::from_value(
            &idle_active(),
            Some(parent_handle(&root)),
            &FsmConfig::default(),
            &sink,
        ));
        let mut inner = Fsm::from_value(&idle_active(), None, &FsmConfig::default(), &sink);

        inner.set_parent(Some(parent_handle(&outer)));
        inner.act_on_event("Start", None);

        assert_eq!(root.hits.get(), 2);
    }

    #[test]
    fn from_decl_matches_from_value() {
        let decl: FsmDecl = serde_json::from_value(idle_active()).unwrap();
        let sink = CollectingSink::new();
        let fsm = Fsm::from_decl(decl, None, &FsmConfig::default(), &sink);

        assert!(sink.is_empty());
        assert_eq!(fsm.states().len(), 2);
        assert_eq!(fsm.region_id("lamp"), Some(RegionId(0)));
    }
}
