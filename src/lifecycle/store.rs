//! Traits the persistence collaborator must supply.
//!
//! The dispatcher never owns storage. It reads two snapshots of the guarded
//! attribute from the entity and delegates every durable operation to a
//! [`Store`], which is expected to map onto whatever transaction machinery
//! the backing layer already has.

use crate::state::StateToken;

/// An entity carrying a guarded state attribute.
///
/// The two accessors are the only entity capabilities the core consumes:
/// the current in-memory value, and the last value the store confirmed
/// durable (`None` until the entity has been persisted once).
pub trait StateRecord {
    type State: StateToken;

    /// Current in-memory value of the guarded attribute.
    fn state(&self) -> &Self::State;

    /// Last committed value of the attribute, `None` for a new entity.
    fn persisted_state(&self) -> Option<&Self::State>;
}

/// Persistence collaborator for one entity type.
///
/// `persist` flushes the entity inside the open transaction and must
/// refresh the entity's persisted snapshot; `commit` is the durability
/// confirmation the dispatcher waits for before running commit hooks.
/// Store failures are surfaced to the caller unmodified — the dispatcher
/// neither masks nor retries them.
pub trait Store<E: StateRecord> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open a transaction.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Flush the entity's pending changes within the open transaction.
    fn persist(&mut self, entity: &mut E) -> Result<(), Self::Error>;

    /// Durably commit the open transaction.
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Discard the open transaction.
    fn rollback(&mut self) -> Result<(), Self::Error>;
}
