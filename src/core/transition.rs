//! Event specs and transitions.

use super::action::Action;
use super::symbol::{RegionId, StateId, SymbolRef};

/// Match predicate for a transition: an event type plus an optional region.
#[derive(Clone, Debug)]
pub struct EventSpec {
    event_type: String,
    region: Option<SymbolRef<RegionId>>,
}

impl EventSpec {
    /// Match `event_type` delivered to any region, or to none.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            region: None,
        }
    }

    /// Match `event_type` only when delivered to the named region.
    pub fn for_region(event_type: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            region: Some(SymbolRef::new(region)),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn region(&self) -> Option<&SymbolRef<RegionId>> {
        self.region.as_ref()
    }

    pub(crate) fn region_mut(&mut self) -> Option<&mut SymbolRef<RegionId>> {
        self.region.as_mut()
    }

    /// Check a concrete `(event_type, region)` pair (pure).
    ///
    /// A spec naming a region that never resolved matches nothing.
    pub fn matches(&self, event_type: &str, region: Option<RegionId>) -> bool {
        if self.event_type != event_type {
            return false;
        }

        match &self.region {
            None => true,
            Some(required) => required.resolved().is_some() && required.resolved() == region,
        }
    }
}

/// An event-triggered edge: run `actions` in order, then move to `target`.
#[derive(Clone, Debug)]
pub struct Transition {
    event: EventSpec,
    actions: Vec<Action>,
    target: Option<SymbolRef<StateId>>,
}

impl Transition {
    pub fn new(event: EventSpec) -> Self {
        Self {
            event,
            actions: Vec::new(),
            target: None,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(SymbolRef::new(target));
        self
    }

    pub fn event(&self) -> &EventSpec {
        &self.event
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Declared target, bound or not.
    pub fn target(&self) -> Option<&SymbolRef<StateId>> {
        self.target.as_ref()
    }

    /// Bound target state. `None` means taking this transition leaves the
    /// FSM without a current state.
    pub fn target_id(&self) -> Option<StateId> {
        self.target.as_ref().and_then(SymbolRef::resolved)
    }

    pub(crate) fn event_mut(&mut self) -> &mut EventSpec {
        &mut self.event
    }

    pub(crate) fn actions_mut(&mut self) -> &mut [Action] {
        &mut self.actions
    }

    pub(crate) fn target_mut(&mut self) -> Option<&mut SymbolRef<StateId>> {
        self.target.as_mut()
    }
}
