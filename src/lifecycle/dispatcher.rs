//! Sequencing of validation, hooks, and persistence around a save.

use crate::guard;
use crate::guard::{StateError, Violations};
use crate::lifecycle::error::SaveError;
use crate::lifecycle::store::{StateRecord, Store};
use crate::registry::Ruleset;
use crate::state::StateToken;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Record of a state change that reached durable storage.
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "")]
pub struct CommittedChange<S: StateToken> {
    /// The guarded attribute.
    pub attribute: String,
    /// Committed value before the transaction, `None` for a creation.
    pub from: Option<S>,
    /// Committed value after the transaction.
    pub to: S,
    /// When the commit was confirmed.
    pub committed_at: DateTime<Utc>,
}

/// Drives the save lifecycle for one entity type's guarded attribute.
///
/// A save attempt runs to completion synchronously: validate, then
/// pre-write hooks, then the store's write, then — only once the store
/// confirms the outermost transaction durable — commit hooks. A rejected
/// validation aborts before any hook or write; a store failure rolls the
/// attempt back and commit hooks never run.
///
/// The dispatcher holds the ruleset behind an `Arc` and adds no locking of
/// its own: concurrent saves of *different* entity instances are fine,
/// while two racing saves of the same instance must be serialized by the
/// caller or the store.
pub struct Dispatcher<S: StateToken, E> {
    rules: Arc<Ruleset<S, E>>,
}

impl<S: StateToken, E> Clone for Dispatcher<S, E> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
        }
    }
}

impl<S, E> Dispatcher<S, E>
where
    S: StateToken,
    E: StateRecord<State = S>,
{
    /// Wrap a freshly built ruleset.
    pub fn new(rules: Ruleset<S, E>) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Share an already-shared ruleset.
    pub fn from_shared(rules: Arc<Ruleset<S, E>>) -> Self {
        Self { rules }
    }

    /// The ruleset this dispatcher enforces.
    pub fn rules(&self) -> &Ruleset<S, E> {
        &self.rules
    }

    /// Validate the entity's pending change without saving anything.
    pub fn validate(&self, entity: &E) -> Result<(), Violations> {
        guard::validate(&self.rules, entity.persisted_state(), entity.state())
    }

    /// Assert that the entity currently sits in one of `allowed`.
    pub fn ensure_one_of(&self, entity: &E, allowed: &[S]) -> Result<(), StateError> {
        guard::ensure_one_of(&self.rules, entity.state(), allowed)
    }

    /// Assert that the entity could legally transition into `next`.
    pub fn ensure_may_transition_to(&self, entity: &E, next: &S) -> Result<(), StateError> {
        guard::ensure_may_transition_to(&self.rules, entity.state(), next)
    }

    /// Non-throwing probe for a transition into `next`.
    pub fn may_transition_to(&self, entity: &E, next: &S) -> bool {
        guard::may_transition_to(&self.rules, entity.state(), next)
    }

    /// Save the entity inside its own transaction.
    ///
    /// Returns the committed change when the attribute's durable value
    /// changed, `None` for a save that did not move the state.
    pub fn save<St: Store<E>>(
        &self,
        entity: &mut E,
        store: &mut St,
    ) -> Result<Option<CommittedChange<S>>, SaveError<St::Error>> {
        let before = entity.persisted_state().cloned();
        self.transact(entity, store, |txn, entity| txn.save(entity))?;

        Ok(match entity.persisted_state() {
            Some(after) if before.as_ref() != Some(after) => Some(CommittedChange {
                attribute: self.rules.attribute().to_string(),
                from: before,
                to: after.clone(),
                committed_at: Utc::now(),
            }),
            _ => None,
        })
    }

    /// Run `f` inside the outermost transaction scope.
    ///
    /// The closure receives a [`Transaction`] handle whose
    /// [`save`](Transaction::save) validates, runs pre-write hooks, and
    /// flushes — but defers commit hooks. After the closure succeeds and the
    /// store confirms the commit, commit hooks fire exactly once if the
    /// committed value differs from the value before the transaction,
    /// however many nested saves occurred. If the closure or the commit
    /// fails, the transaction is rolled back and no commit hook runs.
    ///
    /// A commit hook error surfaces as [`SaveError::CommitHook`], but the
    /// write is durable by then and stays committed.
    pub fn transact<St, T, F>(
        &self,
        entity: &mut E,
        store: &mut St,
        f: F,
    ) -> Result<T, SaveError<St::Error>>
    where
        St: Store<E>,
        F: FnOnce(&mut Transaction<'_, S, E, St>, &mut E) -> Result<T, SaveError<St::Error>>,
    {
        let before = entity.persisted_state().cloned();

        store.begin().map_err(SaveError::Store)?;
        let mut txn = Transaction {
            rules: &self.rules,
            store: &mut *store,
        };
        let result = f(&mut txn, entity);

        match result {
            Ok(value) => {
                store.commit().map_err(SaveError::Store)?;
                self.run_commit_hooks(entity, before.as_ref())?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = store.rollback() {
                    warn!(
                        attribute = %self.rules.attribute(),
                        error = %rollback_error,
                        "rollback failed after aborted save"
                    );
                }
                Err(error)
            }
        }
    }

    fn run_commit_hooks<StErr: std::error::Error + 'static>(
        &self,
        entity: &E,
        before: Option<&S>,
    ) -> Result<(), SaveError<StErr>> {
        let Some(after) = entity.persisted_state() else {
            return Ok(());
        };
        if before == Some(after) {
            return Ok(());
        }

        debug!(
            attribute = %self.rules.attribute(),
            from = ?before.map(StateToken::token),
            to = %after.token(),
            "running commit hooks"
        );
        for hook in self.rules.commit_hooks_for(after) {
            hook(entity).map_err(SaveError::CommitHook)?;
        }
        Ok(())
    }
}

/// Handle for saves inside an open transaction.
///
/// Created by [`Dispatcher::transact`]; every save through it defers commit
/// hooks to the single outermost commit.
pub struct Transaction<'a, S: StateToken, E, St> {
    rules: &'a Ruleset<S, E>,
    store: &'a mut St,
}

impl<S, E, St> Transaction<'_, S, E, St>
where
    S: StateToken,
    E: StateRecord<State = S>,
    St: Store<E>,
{
    /// Validate, run pre-write hooks, and flush the entity.
    ///
    /// Hooks only run when the attribute actually changed in this save;
    /// a no-op save still flushes the entity's other pending changes. A
    /// failing hook aborts the remaining hooks and the save.
    pub fn save(&mut self, entity: &mut E) -> Result<(), SaveError<St::Error>> {
        let was = entity.persisted_state().cloned();
        let is = entity.state().clone();

        if let Err(violations) = guard::validate(self.rules, was.as_ref(), &is) {
            debug!(
                attribute = %self.rules.attribute(),
                from = ?was.as_ref().map(StateToken::token),
                to = %is.token(),
                "save rejected by transition rules"
            );
            return Err(SaveError::Rejected(violations));
        }

        if was.as_ref() != Some(&is) {
            trace!(
                attribute = %self.rules.attribute(),
                to = %is.token(),
                "running pre-write hooks"
            );
            for hook in self.rules.pre_write_hooks_for(&is) {
                hook(entity).map_err(SaveError::PreWriteHook)?;
            }
        }

        self.store.persist(entity).map_err(SaveError::Store)
    }
}
