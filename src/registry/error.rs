//! Build errors for ruleset declaration.

use thiserror::Error;

/// Errors raised when a declared ruleset fails to build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("No transitions declared for {attribute}. Call .permit_transition(from, to) before .build()")]
    NoTransitions { attribute: String },

    #[error("Hook registered for {state:?}, but no transition of {attribute} mentions that state")]
    UndeclaredHookState { attribute: String, state: String },
}
