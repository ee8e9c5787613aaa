//! Record of transitions taken by an FSM.
//!
//! The history is a bounded ring: once `limit` records are held, each new
//! record evicts the oldest. The FSM appends in place after each dispatch
//! and clears it on reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single taken transition.
///
/// # Example
///
/// ```rust
/// use region_fsm::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "Idle".to_string(),
///     to: Some("Active".to_string()),
///     event_type: "Start".to_string(),
///     region: None,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_dead());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left
    pub from: String,
    /// The state entered; `None` when the target never resolved
    pub to: Option<String>,
    /// Event type that fired the transition
    pub event_type: String,
    /// Region the event was delivered to
    pub region: Option<String>,
    /// When the transition was taken
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Whether this transition left the FSM without a current state.
    pub fn is_dead(&self) -> bool {
        self.to.is_none()
    }
}

/// Ordered history of the most recent taken transitions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<TransitionRecord>,
    limit: Option<usize>,
}

impl StateHistory {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create a history keeping at most `limit` records (`None` = unbounded).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a transition, evicting the oldest records beyond the limit.
    pub fn push(&mut self, transition: TransitionRecord) {
        if self.limit == Some(0) {
            return;
        }
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Drop every record, keeping the limit.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Names of the states traversed: the first `from`, then every `to`.
    ///
    /// A `None` entry marks a transition into an unresolved target.
    ///
    /// ```rust
    /// use region_fsm::core::{StateHistory, TransitionRecord};
    /// use chrono::Utc;
    ///
    /// let mut history = StateHistory::new();
    /// history.push(TransitionRecord {
    ///     from: "Idle".to_string(),
    ///     to: Some("Active".to_string()),
    ///     event_type: "Start".to_string(),
    ///     region: None,
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(history.get_path(), vec![Some("Idle"), Some("Active")]);
    /// ```
    pub fn get_path(&self) -> Vec<Option<&str>> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(Some(first.from.as_str()));
        }
        for transition in &self.transitions {
            path.push(transition.to.as_deref());
        }
        path
    }

    /// Elapsed time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> &VecDeque<TransitionRecord> {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
