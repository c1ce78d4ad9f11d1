//! The save lifecycle: validation, hook dispatch, and store delegation.
//!
//! [`Dispatcher`] wires a [`Ruleset`](crate::Ruleset) and the guard checks
//! into an entity's save path. The persistence collaborator stays external,
//! reached through the [`Store`] and [`StateRecord`] traits.

mod dispatcher;
mod error;
mod store;

pub use dispatcher::{CommittedChange, Dispatcher, Transaction};
pub use error::SaveError;
pub use store::{StateRecord, Store};
