//! Errors raised by the strict assertion API.

use thiserror::Error;

/// Failure of a strict state assertion.
///
/// These surface synchronously to the caller of the assertion and are never
/// routed through save validation. "Already in the target state" is a
/// distinct condition from "not reachable": only the latter consulted the
/// transition table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("{attribute} must be one of {allowed:?} but was {actual:?}")]
    InvalidState {
        attribute: String,
        allowed: Vec<String>,
        actual: String,
    },

    #[error("{attribute} already is {state:?}")]
    AlreadyInTargetState { attribute: String, state: String },

    #[error("{attribute} may not transition from {from:?} to {to:?}")]
    TransitionNotPermitted {
        attribute: String,
        from: String,
        to: String,
    },
}

impl StateError {
    /// Whether this failure reports a transition to the state the entity is
    /// already in.
    pub fn is_already_in_target_state(&self) -> bool {
        matches!(self, Self::AlreadyInTargetState { .. })
    }
}
