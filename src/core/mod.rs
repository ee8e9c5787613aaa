//! Core FSM data model.
//!
//! This module contains the building blocks an [`Fsm`](crate::machine::Fsm)
//! owns:
//! - Regions and the damage contract
//! - States, transitions, event specs and actions
//! - Name references bound once by the owning FSM
//! - Immutable transition history

mod action;
mod history;
mod region;
mod state;
mod symbol;
mod transition;

pub use action::{Action, ActionContext, ActionFn, ActionKind};
pub use history::{StateHistory, TransitionRecord};
pub(crate) use region::{same_parent, DamageLink};
pub use region::{parent_handle, Damage, ParentHandle, Region};
pub use state::State;
pub use symbol::{RegionId, StateId, SymbolRef, SymbolTable};
pub use transition::{EventSpec, Transition};
