//! The FSM itself.
//!
//! # Key Concepts
//!
//! - **Construction**: raw data or typed parts are validated best-effort;
//!   problems go to a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink)
//! - **Binding**: one pass turns every name into an index, after all states
//!   and regions are known
//! - **Dispatch**: first matching transition wins, actions run in order
//! - **Damage**: invalidation bubbles from regions through the FSM to its
//!   parent

mod binding;
mod config;
mod debug;
mod fsm;

pub use binding::{check_bindings, BindingError};
pub use config::{FsmConfig, DEFAULT_HISTORY_LIMIT};
pub use fsm::{Dispatch, Fsm};
