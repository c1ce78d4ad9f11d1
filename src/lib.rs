//! Stategate: transition rules and lifecycle hooks for a persisted state
//! attribute.
//!
//! Stategate guards one named attribute on a persisted entity: the attribute
//! may only hold declared states, every change must follow an explicitly
//! permitted transition, and registered hooks run at two well-defined points
//! of the save lifecycle — after validation but before the write is flushed,
//! and after the surrounding transaction is confirmed durable.
//!
//! # Core Concepts
//!
//! - **Ruleset**: the immutable table of states, permitted transitions, and
//!   hooks, declared once via [`RulesetBuilder`]
//! - **Guard**: pure checks in [`guard`] deciding whether a change is legal
//! - **Dispatcher**: [`Dispatcher`] sequences validation, hook fan-out, and
//!   delegation to your [`Store`]
//!
//! The persistence layer stays yours: implement [`StateRecord`] for the
//! entity and [`Store`] over whatever transaction machinery you already
//! have.
//!
//! # Example
//!
//! ```rust
//! use stategate::{Dispatcher, RulesetBuilder, StateRecord, Store};
//!
//! struct User {
//!     state: &'static str,
//!     persisted: Option<&'static str>,
//! }
//!
//! impl StateRecord for User {
//!     type State = &'static str;
//!
//!     fn state(&self) -> &&'static str {
//!         &self.state
//!     }
//!
//!     fn persisted_state(&self) -> Option<&&'static str> {
//!         self.persisted.as_ref()
//!     }
//! }
//!
//! struct MemStore;
//!
//! impl Store<User> for MemStore {
//!     type Error = std::io::Error;
//!
//!     fn begin(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     fn persist(&mut self, user: &mut User) -> Result<(), Self::Error> {
//!         user.persisted = Some(user.state);
//!         Ok(())
//!     }
//!
//!     fn commit(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     fn rollback(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! let rules = RulesetBuilder::new("state")
//!     .permit_transition("registered", "active")
//!     .permit_transition("active", "banned")
//!     .on_commit("banned", |_user: &User| {
//!         // notify moderation, revoke sessions, ...
//!         Ok(())
//!     })
//!     .build()
//!     .expect("valid ruleset");
//!
//! let dispatcher = Dispatcher::new(rules);
//! let mut store = MemStore;
//! let mut user = User { state: "registered", persisted: None };
//!
//! dispatcher.save(&mut user, &mut store).expect("initial save");
//!
//! user.state = "active";
//! let change = dispatcher.save(&mut user, &mut store).expect("permitted");
//! assert_eq!(change.map(|c| c.to), Some("active"));
//!
//! // "active" back to "registered" was never permitted.
//! user.state = "registered";
//! assert!(dispatcher.save(&mut user, &mut store).is_err());
//! ```

pub mod guard;
pub mod lifecycle;
mod macros;
pub mod registry;
pub mod state;

// Re-export commonly used types
pub use guard::{StateError, Violation, Violations};
pub use lifecycle::{CommittedChange, Dispatcher, SaveError, StateRecord, Store, Transaction};
pub use registry::{BuildError, CommitHook, HookError, PreWriteHook, Ruleset, RulesetBuilder};
pub use state::StateToken;
