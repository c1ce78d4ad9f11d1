//! Macros for ergonomic state token definitions.

/// Generate a state enum together with its `StateToken` implementation.
///
/// Each variant is paired with the string literal used as its canonical
/// token. The generated enum derives everything `StateToken` requires.
///
/// # Example
///
/// ```
/// use stategate::StateToken;
///
/// stategate::state_tokens! {
///     pub enum UserState {
///         Registered = "registered",
///         Active = "active",
///         Banned = "banned",
///         Deleted = "deleted",
///     }
/// }
///
/// assert_eq!(UserState::Banned.token(), "banned");
/// ```
#[macro_export]
macro_rules! state_tokens {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $token:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::StateToken for $name {
            fn token(&self) -> &str {
                match self {
                    $(Self::$variant => $token),*
                }
            }
        }
    };
}
