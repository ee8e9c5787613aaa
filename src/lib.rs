//! Region FSM: a declarative state machine for visual regions
//!
//! A composition hands external events (pointer, timer, custom signals) to
//! an [`Fsm`]. The FSM picks the first matching transition of its current
//! state, runs that transition's actions against its regions, and moves to
//! the target state. Regions whose content changes report damage upward so
//! the composition root knows to redraw.
//!
//! # Core Concepts
//!
//! - **Region**: a named visual element that can be damaged
//! - **State / Transition**: ordered, first-match-wins event handling
//! - **Binding**: names in declarations resolve once, after everything is
//!   loaded, so forward references just work
//! - **Diagnostics**: malformed declarations are reported and skipped,
//!   never fatal
//!
//! # Example
//!
//! ```rust
//! use region_fsm::diagnostics::CollectingSink;
//! use region_fsm::machine::{Dispatch, Fsm, FsmConfig};
//! use serde_json::json;
//!
//! let sink = CollectingSink::new();
//! let mut fsm = Fsm::from_value(
//!     &json!({
//!         "regions": [{ "name": "lamp", "content": "off.png" }],
//!         "states": [
//!             {
//!                 "name": "Idle",
//!                 "transitions": [{
//!                     "event": { "type": "Start" },
//!                     "actions": [{ "kind": "setContent", "region": "lamp", "value": "on.png" }],
//!                     "target": "Active"
//!                 }]
//!             },
//!             { "name": "Active" }
//!         ]
//!     }),
//!     None,
//!     &FsmConfig::default(),
//!     &sink,
//! );
//!
//! assert!(fsm.act_on_event("Start", None).fired());
//! assert_eq!(fsm.current_state().unwrap().name(), "Active");
//! assert_eq!(fsm.act_on_event("Start", None), Dispatch::Ignored {
//!     state: fsm.current_state_id().unwrap(),
//! });
//! ```

pub mod builder;
pub mod core;
pub mod decl;
pub mod diagnostics;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{Action, Damage, EventSpec, Region, State, Transition};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use machine::{Dispatch, Fsm, FsmConfig};
