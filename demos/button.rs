//! Push Button
//!
//! This example loads a button FSM from JSON and drives it with pointer
//! events, the way a composition would.
//!
//! Key concepts:
//! - Declarations are plain data, loaded best-effort
//! - Events are delivered by region name
//! - Content changes damage the composition, which then redraws
//!
//! Run with: cargo run --example button

use region_fsm::core::{parent_handle, Damage};
use region_fsm::diagnostics::TracingSink;
use region_fsm::machine::{Fsm, FsmConfig};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

/// Stand-in for the composition root; counts redraw requests.
#[derive(Default)]
struct Window {
    redraws: Cell<usize>,
}

impl Damage for Window {
    fn damage(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

fn main() {
    println!("=== Push Button Example ===\n");

    let declaration = json!({
        "regions": [{ "name": "button", "content": "button-up.png" }],
        "states": [
            {
                "name": "Idle",
                "transitions": [{
                    "event": { "type": "press", "region": "button" },
                    "actions": [{ "kind": "setContent", "region": "button", "value": "button-down.png" }],
                    "target": "Pressed"
                }]
            },
            {
                "name": "Pressed",
                "transitions": [
                    {
                        "event": { "type": "release", "region": "button" },
                        "actions": [{ "kind": "setContent", "region": "button", "value": "button-up.png" }],
                        "target": "Idle"
                    },
                    {
                        "event": { "type": "leave" },
                        "actions": [{ "kind": "setContent", "region": "button", "value": "button-up.png" }],
                        "target": "Idle"
                    }
                ]
            }
        ]
    });

    let window = Rc::new(Window::default());
    let mut fsm = Fsm::from_value(
        &declaration,
        Some(parent_handle(&window)),
        &FsmConfig::default(),
        &TracingSink,
    );

    println!("{}", fsm.dump());

    let events = [
        ("press", Some("button")),
        ("press", Some("button")),
        ("release", Some("button")),
        ("press", Some("elsewhere")),
        ("press", Some("button")),
        ("leave", None),
    ];

    for (event_type, region) in events {
        let result = fsm.act_on_named_event(event_type, region);
        let content = fsm
            .region_by_name("button")
            .and_then(|r| r.content())
            .unwrap_or("<none>");
        println!(
            "{:>8} @ {:<10} -> {:?}, button shows {}",
            event_type,
            region.unwrap_or("-"),
            result,
            content
        );
    }

    println!("\nRedraws requested: {}", window.redraws.get());
    println!("Path: {:?}", fsm.history().get_path());

    println!("\n=== Example Complete ===");
}
