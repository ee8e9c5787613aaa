//! Builder API for constructing FSMs in code.
//!
//! Declarations loaded from data go through [`Fsm::from_value`] or
//! [`Fsm::from_decl`]; these builders cover machines written by hand,
//! including ones with host callbacks that data cannot express.
//!
//! [`Fsm::from_value`]: crate::machine::Fsm::from_value
//! [`Fsm::from_decl`]: crate::machine::Fsm::from_decl

pub mod error;
pub mod machine;
pub mod transition;

pub use error::BuildError;
pub use machine::FsmBuilder;
pub use transition::{StateBuilder, TransitionBuilder};
