//! Actions fired by transitions.

use super::region::Region;
use super::symbol::{RegionId, SymbolRef};
use std::fmt;
use std::sync::Arc;

/// Host-supplied effect, run with the triggering event.
pub type ActionFn = Arc<dyn Fn(&mut ActionContext<'_>) + Send + Sync>;

/// What an action does to its bound region.
#[derive(Clone)]
pub enum ActionKind {
    /// Replace the region's content key.
    SetContent(String),

    /// Remove the region's content.
    ClearContent,

    /// Signal damage without changing content.
    Damage,

    /// Run a host callback. Called even when the bound region is unresolved,
    /// in which case [`ActionContext::region`] is `None`.
    Callback(ActionFn),
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetContent(value) => f.debug_tuple("SetContent").field(value).finish(),
            Self::ClearContent => write!(f, "ClearContent"),
            Self::Damage => write!(f, "Damage"),
            Self::Callback(_) => write!(f, "Callback(..)"),
        }
    }
}

/// Everything an action can see while it runs.
pub struct ActionContext<'a> {
    event_type: &'a str,
    event_region: Option<RegionId>,
    region: Option<&'a mut Region>,
}

impl<'a> ActionContext<'a> {
    /// Type of the event that fired the transition.
    pub fn event_type(&self) -> &str {
        self.event_type
    }

    /// Region the event was delivered to, if any.
    pub fn event_region(&self) -> Option<RegionId> {
        self.event_region
    }

    /// The region this action is bound to.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_deref()
    }

    pub fn region_mut(&mut self) -> Option<&mut Region> {
        self.region.as_deref_mut()
    }
}

/// An effect bound to a region by name.
#[derive(Clone, Debug)]
pub struct Action {
    region: SymbolRef<RegionId>,
    kind: ActionKind,
}

impl Action {
    pub fn new(region: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            region: SymbolRef::new(region),
            kind,
        }
    }

    pub fn set_content(region: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(region, ActionKind::SetContent(value.into()))
    }

    pub fn clear_content(region: impl Into<String>) -> Self {
        Self::new(region, ActionKind::ClearContent)
    }

    pub fn damage(region: impl Into<String>) -> Self {
        Self::new(region, ActionKind::Damage)
    }

    pub fn callback<F>(region: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) + Send + Sync + 'static,
    {
        Self::new(region, ActionKind::Callback(Arc::new(f)))
    }

    pub fn region(&self) -> &SymbolRef<RegionId> {
        &self.region
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub(crate) fn region_mut(&mut self) -> &mut SymbolRef<RegionId> {
        &mut self.region
    }

    /// Run the action against the FSM's region arena.
    ///
    /// Built-in kinds are no-ops when the bound region did not resolve.
    pub(crate) fn execute(
        &self,
        event_type: &str,
        event_region: Option<RegionId>,
        regions: &mut [Region],
    ) {
        let target = self
            .region
            .resolved()
            .and_then(|id| regions.get_mut(id.index()));

        match (&self.kind, target) {
            (ActionKind::SetContent(value), Some(region)) => {
                region.set_content(Some(value.clone()));
            }
            (ActionKind::ClearContent, Some(region)) => {
                region.set_content(None);
            }
            (ActionKind::Damage, Some(region)) => region.damage(),
            (ActionKind::Callback(f), region) => {
                let mut context = ActionContext {
                    event_type,
                    event_region,
                    region,
                };
                f(&mut context);
            }
            (_, None) => {
                tracing::debug!(
                    region = %self.region.name(),
                    "Skipping action bound to unresolved region"
                );
            }
        }
    }
}
