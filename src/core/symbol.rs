//! Typed indices and name references.
//!
//! Declarations refer to states and regions by name. Those names are kept in
//! a [`SymbolRef`] until the owning FSM has seen every declaration, then bound
//! once to an index into the FSM's arena.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Index of a state inside its owning FSM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Position of the state in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a region inside its owning FSM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    /// Position of the region in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Name lookup table built by the FSM before binding.
pub type SymbolTable<I> = HashMap<String, I>;

/// A reference that starts as a name and is bound to an index once.
///
/// An unbound reference is inert: anything depending on it never fires.
///
/// # Example
///
/// ```rust
/// use region_fsm::core::{RegionId, SymbolRef};
///
/// let reference: SymbolRef<RegionId> = SymbolRef::new("button");
/// assert_eq!(reference.name(), "button");
/// assert!(!reference.is_resolved());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolRef<I> {
    name: String,
    resolved: Option<I>,
}

impl<I: Copy> SymbolRef<I> {
    /// Create an unbound reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: None,
        }
    }

    /// The name as written in the declaration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound index, if the name was found.
    pub fn resolved(&self) -> Option<I> {
        self.resolved
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Look the name up in `table`. Returns whether it was found.
    pub(crate) fn bind(&mut self, table: &SymbolTable<I>) -> bool {
        self.resolved = table.get(&self.name).copied();
        self.resolved.is_some()
    }
}

impl<I> fmt::Display for SymbolRef<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.resolved.is_some() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}?", self.name)
        }
    }
}
