//! Serializable FSM declarations.
//!
//! Declarations are the raw, name-based form an FSM is loaded from:
//!
//! ```json
//! {
//!   "regions": [{ "name": "button", "content": "up.png" }],
//!   "states": [
//!     {
//!       "name": "Up",
//!       "transitions": [{
//!         "event": { "type": "press", "region": "button" },
//!         "actions": [{ "kind": "setContent", "region": "button", "value": "down.png" }],
//!         "target": "Down"
//!       }]
//!     },
//!     { "name": "Down" }
//!   ]
//! }
//! ```
//!
//! Each declaration converts into its core counterpart with every reference
//! still unbound.

use crate::core::{Action, EventSpec, Region, State, Transition};
use serde::{Deserialize, Serialize};

/// A whole FSM: regions plus states, first state is the start state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FsmDecl {
    #[serde(default)]
    pub regions: Vec<RegionDecl>,
    #[serde(default)]
    pub states: Vec<StateDecl>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<TransitionDecl>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionDecl {
    pub event: EventDecl,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDecl {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Declarable actions. Callbacks exist only in code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionDecl {
    SetContent { region: String, value: String },
    ClearContent { region: String },
    Damage { region: String },
}

impl From<RegionDecl> for Region {
    fn from(decl: RegionDecl) -> Self {
        let region = Region::new(decl.name);
        match decl.content {
            Some(content) => region.with_content(content),
            None => region,
        }
    }
}

impl From<EventDecl> for EventSpec {
    fn from(decl: EventDecl) -> Self {
        match decl.region {
            Some(region) => EventSpec::for_region(decl.event_type, region),
            None => EventSpec::new(decl.event_type),
        }
    }
}

impl From<ActionDecl> for Action {
    fn from(decl: ActionDecl) -> Self {
        match decl {
            ActionDecl::SetContent { region, value } => Action::set_content(region, value),
            ActionDecl::ClearContent { region } => Action::clear_content(region),
            ActionDecl::Damage { region } => Action::damage(region),
        }
    }
}

impl From<TransitionDecl> for Transition {
    fn from(decl: TransitionDecl) -> Self {
        let transition = decl
            .actions
            .into_iter()
            .map(Action::from)
            .fold(Transition::new(decl.event.into()), Transition::with_action);

        match decl.target {
            Some(target) => transition.with_target(target),
            None => transition,
        }
    }
}

impl From<StateDecl> for State {
    fn from(decl: StateDecl) -> Self {
        decl.transitions
            .into_iter()
            .map(Transition::from)
            .fold(State::new(decl.name), State::with_transition)
    }
}
