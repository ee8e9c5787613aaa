//! Named FSM states.
//!
//! A state owns its outgoing transitions. Declaration order is dispatch
//! priority: the first transition whose event spec matches is taken.

use super::symbol::RegionId;
use super::transition::Transition;

/// A named node holding ordered transitions.
///
/// # Example
///
/// ```rust
/// use region_fsm::core::{Action, EventSpec, State, Transition};
///
/// let idle = State::new("Idle").with_transition(
///     Transition::new(EventSpec::new("Start"))
///         .with_action(Action::set_content("lamp", "on.png"))
///         .with_target("Active"),
/// );
///
/// assert_eq!(idle.name(), "Idle");
/// assert_eq!(idle.transitions().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct State {
    name: String,
    transitions: Vec<Transition>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
        }
    }

    /// Append a transition. Earlier transitions take priority.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Get the state's name for display/logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Whether no event can leave this state.
    pub fn is_final(&self) -> bool {
        self.transitions.is_empty()
    }

    /// First transition matching `(event_type, region)`, if any (pure).
    ///
    /// Later transitions are never examined once one matches.
    pub fn find_transition(&self, event_type: &str, region: Option<RegionId>) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.event().matches(event_type, region))
    }

    pub(crate) fn transitions_mut(&mut self) -> &mut [Transition] {
        &mut self.transitions
    }
}
