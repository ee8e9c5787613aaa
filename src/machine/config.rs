//! Loading options.

use serde::{Deserialize, Serialize};

/// Transitions kept in an FSM's history unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// How strictly an FSM reports problems found while binding names, and how
/// much of its past it remembers.
///
/// Unresolved references never stop a load; they only stay inert.
/// `report_unresolved` decides whether they are also reported to the
/// diagnostic sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsmConfig {
    /// Report every unresolved state or region name (default `true`).
    pub report_unresolved: bool,

    /// Most recent transitions kept in the history; `None` keeps all.
    pub history_limit: Option<usize>,
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self {
            report_unresolved: true,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl FsmConfig {
    /// Bind silently, leaving unresolved references inert without a report.
    pub fn quiet() -> Self {
        Self {
            report_unresolved: false,
            ..Self::default()
        }
    }

    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }
}
