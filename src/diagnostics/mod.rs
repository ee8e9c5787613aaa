//! Diagnostic reporting for FSM loading.
//!
//! Loading never fails. Problems with a declaration are described by a
//! [`Diagnostic`] and handed to a [`DiagnosticSink`]; the FSM is built from
//! whatever survived. One malformed FSM therefore never stops a document
//! holding many of them from loading.

use crate::machine::BindingError;
use std::cell::RefCell;
use thiserror::Error;

/// A problem found while loading or binding an FSM declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("FSM regions must be an array")]
    RegionsNotArray,

    #[error("FSM states must be an array")]
    StatesNotArray,

    #[error("FSM must declare at least one state")]
    NoStates,

    #[error("Duplicate region name '{name}'")]
    DuplicateRegion { name: String },

    #[error("Duplicate state name '{name}'")]
    DuplicateState { name: String },

    #[error("Region {index} is malformed: {message}")]
    MalformedRegion { index: usize, message: String },

    #[error("State {index} is malformed: {message}")]
    MalformedState { index: usize, message: String },

    #[error("Unresolved reference: {0}")]
    Unresolved(#[from] BindingError),
}

/// Receiver for loading diagnostics.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Sink that logs each diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::warn!(diagnostic = %diagnostic, "FSM declaration problem");
    }
}

/// Sink that keeps every diagnostic for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Drain the collected diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic.clone());
    }
}
