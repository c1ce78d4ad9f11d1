//! Hook callback types.

use std::sync::Arc;

/// Error type hooks are allowed to raise.
///
/// Hooks run arbitrary caller logic, so their failures are carried as-is
/// rather than forced into a crate-specific error enum.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Side effect run after validation, before the change is flushed.
///
/// Receives the entity mutably: attribute edits made here land in the same
/// flush as the state change itself.
pub type PreWriteHook<E> = Arc<dyn Fn(&mut E) -> Result<(), HookError> + Send + Sync>;

/// Side effect run only once the surrounding transaction is durable.
///
/// Receives the entity in its fully committed form.
pub type CommitHook<E> = Arc<dyn Fn(&E) -> Result<(), HookError> + Send + Sync>;
