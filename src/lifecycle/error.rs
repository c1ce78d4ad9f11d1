//! Errors from a save attempt.

use crate::guard::Violations;
use crate::registry::HookError;
use thiserror::Error;

/// Why a save attempt did not complete cleanly.
///
/// Generic over the store's own error type so store failures pass through
/// unmodified. Hook failures likewise carry whatever the hook raised.
#[derive(Debug, Error)]
pub enum SaveError<St: std::error::Error + 'static> {
    /// Rejected at the validation boundary: no hooks ran, nothing was
    /// written.
    #[error("{0}")]
    Rejected(Violations),

    /// A pre-write hook failed. Remaining pre-write hooks were skipped and
    /// the write never happened.
    #[error("pre-write hook failed: {0}")]
    PreWriteHook(HookError),

    /// A commit hook failed. The write is already durable at this point —
    /// the error reaches the caller, but the committed change stands.
    #[error("commit hook failed after commit: {0}")]
    CommitHook(HookError),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(St),
}

impl<St: std::error::Error + 'static> SaveError<St> {
    /// The violations behind a validation rejection, if that is what this is.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Rejected(violations) => Some(violations),
            _ => None,
        }
    }
}
