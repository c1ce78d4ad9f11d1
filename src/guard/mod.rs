//! Pure decision layer for attempted state changes.
//!
//! Given a [`Ruleset`](crate::Ruleset) and the previous/candidate values of
//! the attribute, this module decides whether a change is legal and builds
//! the structured failure when it is not. Nothing here touches persistence.

mod checks;
mod error;
mod violations;

pub use checks::{
    check_domain, check_transition, ensure_may_transition_to, ensure_one_of, may_transition_to,
    validate,
};
pub use error::StateError;
pub use violations::{Violation, Violations};
