//! Name binding for a finished set of states and regions.
//!
//! Binding runs after every declaration is known, so forward references
//! resolve regardless of declaration order. Checking the result uses
//! `Validation` to collect every unresolved reference in one pass.

use crate::core::{RegionId, State, StateId, SymbolTable};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A reference that did not resolve during binding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("state '{state}' transition {transition} has no target state")]
    MissingTarget { state: String, transition: usize },

    #[error("state '{state}' transition {transition} targets unknown state '{name}'")]
    UnknownTarget {
        state: String,
        transition: usize,
        name: String,
    },

    #[error("state '{state}' transition {transition} listens on unknown region '{name}'")]
    UnknownEventRegion {
        state: String,
        transition: usize,
        name: String,
    },

    #[error(
        "state '{state}' transition {transition} action {action} acts on unknown region '{name}'"
    )]
    UnknownActionRegion {
        state: String,
        transition: usize,
        action: usize,
        name: String,
    },
}

/// Resolve every target, event region and action region in place.
pub(crate) fn bind_states(
    states: &mut [State],
    state_table: &SymbolTable<StateId>,
    region_table: &SymbolTable<RegionId>,
) {
    for state in states.iter_mut() {
        for transition in state.transitions_mut() {
            if let Some(target) = transition.target_mut() {
                target.bind(state_table);
            }
            if let Some(region) = transition.event_mut().region_mut() {
                region.bind(region_table);
            }
            for action in transition.actions_mut() {
                action.region_mut().bind(region_table);
            }
        }
    }
}

fn check(
    ok: bool,
    error: impl FnOnce() -> BindingError,
) -> Validation<(), NonEmptyVec<BindingError>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

/// Collect ALL unresolved references across `states` (pure).
///
/// Returns `Validation::Success(())` when everything is bound.
pub fn check_bindings(states: &[State]) -> Validation<(), NonEmptyVec<BindingError>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<BindingError>>> = Vec::new();

    for state in states {
        for (t, transition) in state.transitions().iter().enumerate() {
            let target = match transition.target() {
                None => Validation::fail(BindingError::MissingTarget {
                    state: state.name().to_string(),
                    transition: t,
                }),
                Some(target) => check(target.is_resolved(), || BindingError::UnknownTarget {
                    state: state.name().to_string(),
                    transition: t,
                    name: target.name().to_string(),
                }),
            };
            checks.push(target);

            if let Some(region) = transition.event().region() {
                checks.push(check(region.is_resolved(), || {
                    BindingError::UnknownEventRegion {
                        state: state.name().to_string(),
                        transition: t,
                        name: region.name().to_string(),
                    }
                }));
            }

            for (a, action) in transition.actions().iter().enumerate() {
                checks.push(check(action.region().is_resolved(), || {
                    BindingError::UnknownActionRegion {
                        state: state.name().to_string(),
                        transition: t,
                        action: a,
                        name: action.region().name().to_string(),
                    }
                }));
            }
        }
    }

    if checks.is_empty() {
        return Validation::success(());
    }
    Validation::all_vec(checks).map(|_| ())
}
