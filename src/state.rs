//! State identity for guarded attributes.
//!
//! Every value a guarded attribute can hold is a state token: an opaque
//! identifier with a canonical string form. Transition rules, hook lookup,
//! and error reporting all operate on tokens.

use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for the values a guarded state attribute may hold.
///
/// Tokens are compared with the type's own equality; the `token()` string is
/// the canonical form used whenever a state appears in an error message.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: tokens key the transition and hook tables
/// - `Debug`: tokens must be debuggable for diagnostics
/// - `Serialize`: tokens cross the persistence boundary
///
/// `String` and `&'static str` implement this out of the box, so a ruleset
/// can be declared over plain string literals. Domain enums implement it
/// directly, or through the [`state_tokens!`](crate::state_tokens) macro.
///
/// # Example
///
/// ```rust
/// use stategate::StateToken;
/// use serde::Serialize;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
/// enum OrderState {
///     Draft,
///     Placed,
///     Shipped,
/// }
///
/// impl StateToken for OrderState {
///     fn token(&self) -> &str {
///         match self {
///             Self::Draft => "draft",
///             Self::Placed => "placed",
///             Self::Shipped => "shipped",
///         }
///     }
/// }
///
/// assert_eq!(OrderState::Placed.token(), "placed");
/// ```
pub trait StateToken: Clone + Eq + Hash + Debug + Serialize + Send + Sync + 'static {
    /// Canonical string form of this state.
    ///
    /// Returned by reference for zero-cost naming; used verbatim in every
    /// reported violation and assertion failure.
    fn token(&self) -> &str;
}

impl StateToken for String {
    fn token(&self) -> &str {
        self
    }
}

impl StateToken for &'static str {
    fn token(&self) -> &str {
        self
    }
}
