//! Builders for states and their transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, ActionContext, EventSpec, State, Transition};

/// Builder for constructing transitions with a fluent API.
#[derive(Default)]
pub struct TransitionBuilder {
    event: Option<EventSpec>,
    actions: Vec<Action>,
    target: Option<String>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire on `event_type` delivered to any region (required, or use
    /// [`on_region`](Self::on_region)).
    pub fn on(mut self, event_type: impl Into<String>) -> Self {
        self.event = Some(EventSpec::new(event_type));
        self
    }

    /// Fire on `event_type` delivered to the named region.
    pub fn on_region(mut self, event_type: impl Into<String>, region: impl Into<String>) -> Self {
        self.event = Some(EventSpec::for_region(event_type, region));
        self
    }

    /// Append an action. Actions run in the order they are added.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn set_content(self, region: impl Into<String>, value: impl Into<String>) -> Self {
        self.action(Action::set_content(region, value))
    }

    pub fn clear_content(self, region: impl Into<String>) -> Self {
        self.action(Action::clear_content(region))
    }

    pub fn damage(self, region: impl Into<String>) -> Self {
        self.action(Action::damage(region))
    }

    /// Append a host callback bound to `region`.
    pub fn call<F>(self, region: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) + Send + Sync + 'static,
    {
        self.action(Action::callback(region, f))
    }

    /// Set the target state. Without one, taking the transition leaves the
    /// FSM with no current state.
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.target = Some(state.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let event = self.event.ok_or(BuildError::MissingEvent)?;

        let transition = self
            .actions
            .into_iter()
            .fold(Transition::new(event), Transition::with_action);

        Ok(match self.target {
            Some(target) => transition.with_target(target),
            None => transition,
        })
    }
}

/// Builder for a state and its ordered transitions.
pub struct StateBuilder {
    name: String,
    transitions: Vec<TransitionBuilder>,
}

impl StateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
        }
    }

    /// Add a transition. Earlier transitions take priority.
    pub fn transition(mut self, builder: TransitionBuilder) -> Self {
        self.transitions.push(builder);
        self
    }

    /// Shorthand for an action-less transition on `event_type` to `target`.
    pub fn goto(self, event_type: impl Into<String>, target: impl Into<String>) -> Self {
        self.transition(TransitionBuilder::new().on(event_type).to(target))
    }

    /// Build the state, failing on the first invalid transition.
    pub fn build(self) -> Result<State, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::MissingStateName);
        }

        let name = self.name;
        self.transitions
            .into_iter()
            .try_fold(State::new(name.clone()), |state, builder| {
                let transition = builder
                    .build()
                    .map_err(|source| BuildError::InvalidTransition {
                        state: name.clone(),
                        source: Box::new(source),
                    })?;
                Ok(state.with_transition(transition))
            })
    }
}
