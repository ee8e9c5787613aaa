//! Build errors for FSM, state and transition builders.

use thiserror::Error;

/// Misuse of the builder API.
///
/// Problems with the described machine itself (duplicate names, unknown
/// targets) are not errors here; they are reported to the diagnostic sink
/// when the FSM is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("State name not specified. Pass a non-empty name to StateBuilder::new")]
    MissingStateName,

    #[error("Region name not specified. Pass a non-empty name")]
    MissingRegionName,

    #[error("Transition event not specified. Call .on(event) or .on_region(event, region)")]
    MissingEvent,

    #[error("Transition in state '{state}' is invalid: {source}")]
    InvalidTransition {
        state: String,
        #[source]
        source: Box<BuildError>,
    },
}
