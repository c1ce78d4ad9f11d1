//! Pure transition checks over a ruleset.
//!
//! Everything here is a pure function of the ruleset and the values it is
//! given: no entity access, no persistence, no side effects. The lifecycle
//! dispatcher composes these at save time; callers can also use them
//! directly for ad-hoc assertions.

use crate::guard::error::StateError;
use crate::guard::violations::{Violation, Violations};
use crate::registry::Ruleset;
use crate::state::StateToken;

/// Check that `value` belongs to the declared state set.
///
/// This is the allowed-value domain constraint: it fires before, and
/// independently of, any transition rule.
pub fn check_domain<S: StateToken, E>(rules: &Ruleset<S, E>, value: &S) -> Result<(), Violation> {
    if rules.is_declared(value) {
        return Ok(());
    }
    Err(Violation::Domain {
        attribute: rules.attribute().to_string(),
        value: value.token().to_string(),
    })
}

/// Check that the change from `was` to `is` follows a permitted transition.
///
/// Passes when there is no previous snapshot (initial creation — any value
/// is accepted at this layer), when the value did not change, or when the
/// pair is declared.
pub fn check_transition<S: StateToken, E>(
    rules: &Ruleset<S, E>,
    was: Option<&S>,
    is: &S,
) -> Result<(), Violation> {
    let Some(was) = was else {
        return Ok(());
    };

    if was == is || rules.is_permitted(was, is) {
        return Ok(());
    }

    Err(Violation::InvalidTransition {
        attribute: rules.attribute().to_string(),
        from: was.token().to_string(),
        to: is.token().to_string(),
    })
}

/// The save-time validation boundary: domain check first, then the
/// transition check. A domain violation short-circuits — an out-of-domain
/// value is never also reported as a bad transition.
pub fn validate<S: StateToken, E>(
    rules: &Ruleset<S, E>,
    was: Option<&S>,
    is: &S,
) -> Result<(), Violations> {
    let mut violations = Violations::new(rules.attribute());

    match check_domain(rules, is) {
        Err(violation) => violations.push(violation),
        Ok(()) => {
            if let Err(violation) = check_transition(rules, was, is) {
                violations.push(violation);
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Assert that `current` is one of `allowed`.
///
/// Pure predicate over the passed-in set; the ruleset only supplies the
/// attribute name for the error.
pub fn ensure_one_of<S: StateToken, E>(
    rules: &Ruleset<S, E>,
    current: &S,
    allowed: &[S],
) -> Result<(), StateError> {
    if allowed.iter().any(|state| state == current) {
        return Ok(());
    }

    Err(StateError::InvalidState {
        attribute: rules.attribute().to_string(),
        allowed: allowed.iter().map(|s| s.token().to_string()).collect(),
        actual: current.token().to_string(),
    })
}

/// Assert that a transition from `current` into `next` would be legal.
///
/// Asking to transition into the current state fails with the distinct
/// already-in-target-state condition, reported without consulting the
/// transition table.
pub fn ensure_may_transition_to<S: StateToken, E>(
    rules: &Ruleset<S, E>,
    current: &S,
    next: &S,
) -> Result<(), StateError> {
    if next == current {
        return Err(StateError::AlreadyInTargetState {
            attribute: rules.attribute().to_string(),
            state: current.token().to_string(),
        });
    }

    if rules.is_permitted(current, next) {
        return Ok(());
    }

    Err(StateError::TransitionNotPermitted {
        attribute: rules.attribute().to_string(),
        from: current.token().to_string(),
        to: next.token().to_string(),
    })
}

/// Non-throwing probe: would a save moving `current` to `next` pass?
///
/// A self-transition reports `false`, matching the strict variant's
/// narrower intent rather than the no-op leniency of save validation.
pub fn may_transition_to<S: StateToken, E>(rules: &Ruleset<S, E>, current: &S, next: &S) -> bool {
    current != next && rules.is_permitted(current, next)
}
