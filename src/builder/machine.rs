//! Builder for constructing FSMs in code.

use crate::builder::error::BuildError;
use crate::builder::transition::StateBuilder;
use crate::core::{ParentHandle, Region, State};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::machine::{Fsm, FsmConfig};

/// Builder for constructing FSMs with a fluent API.
///
/// # Example
///
/// ```rust
/// use region_fsm::builder::{FsmBuilder, StateBuilder, TransitionBuilder};
/// use region_fsm::core::Region;
///
/// let mut fsm = FsmBuilder::new()
///     .region(Region::new("lamp").with_content("off.png"))?
///     .state(StateBuilder::new("Off").transition(
///         TransitionBuilder::new()
///             .on_region("press", "lamp")
///             .set_content("lamp", "on.png")
///             .to("On"),
///     ))?
///     .state(StateBuilder::new("On").goto("press", "Off"))?
///     .build();
///
/// fsm.act_on_named_event("press", Some("lamp"));
/// assert_eq!(fsm.current_state().unwrap().name(), "On");
/// assert_eq!(fsm.region_by_name("lamp").unwrap().content(), Some("on.png"));
/// # Ok::<(), region_fsm::builder::BuildError>(())
/// ```
#[derive(Default)]
pub struct FsmBuilder {
    regions: Vec<Region>,
    states: Vec<State>,
    parent: Option<ParentHandle>,
    config: FsmConfig,
}

impl FsmBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region. Returns an error if the region has no name.
    pub fn region(mut self, region: Region) -> Result<Self, BuildError> {
        if region.name().is_empty() {
            return Err(BuildError::MissingRegionName);
        }
        self.regions.push(region);
        Ok(self)
    }

    /// Add a state using a builder.
    /// Returns an error if the builder fails validation.
    pub fn state(mut self, builder: StateBuilder) -> Result<Self, BuildError> {
        let state = builder.build()?;
        self.states.push(state);
        Ok(self)
    }

    /// Add a pre-built state.
    pub fn add_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: Vec<State>) -> Self {
        self.states.extend(states);
        self
    }

    /// Set the parent damage receiver.
    pub fn parent(mut self, parent: ParentHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn config(mut self, config: FsmConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the FSM, logging any diagnostics through `tracing`.
    pub fn build(self) -> Fsm {
        self.build_with(&TracingSink)
    }

    /// Build the FSM, reporting diagnostics to `sink`.
    pub fn build_with(self, sink: &dyn DiagnosticSink) -> Fsm {
        Fsm::from_parts(self.regions, self.states, self.parent, &self.config, sink)
    }
}
