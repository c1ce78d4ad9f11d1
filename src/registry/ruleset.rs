//! The immutable transition rule table.

use crate::registry::hooks::{CommitHook, PreWriteHook};
use crate::state::StateToken;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Transition rules and hooks for one guarded attribute.
///
/// A `Ruleset` is built once by [`RulesetBuilder`](crate::RulesetBuilder)
/// when the entity type is defined and never mutated afterwards. It is
/// `Send + Sync` and is meant to be shared behind an `Arc` by every
/// instance of the entity type for the life of the process.
///
/// The declared state set is exactly the set of tokens appearing as a
/// transition endpoint; a value outside it is a domain violation before any
/// transition rule is consulted.
pub struct Ruleset<S: StateToken, E> {
    pub(crate) attribute: String,
    pub(crate) states: HashSet<S>,
    pub(crate) transitions: HashMap<S, HashSet<S>>,
    pub(crate) pre_write_hooks: HashMap<S, Vec<PreWriteHook<E>>>,
    pub(crate) commit_hooks: HashMap<S, Vec<CommitHook<E>>>,
    pub(crate) common_pre_write_hooks: Vec<PreWriteHook<E>>,
    pub(crate) common_commit_hooks: Vec<CommitHook<E>>,
}

impl<S: StateToken, E> Ruleset<S, E> {
    /// Name of the guarded attribute, as it appears in reported errors.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Iterate over every declared state.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.states.iter()
    }

    /// Whether `state` appears as an endpoint of any declared transition.
    pub fn is_declared(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Whether the directed pair `(from, to)` was declared.
    ///
    /// Directional: permitting `(a, b)` says nothing about `(b, a)`.
    pub fn is_permitted(&self, from: &S, to: &S) -> bool {
        self.transitions
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// Pre-write hooks that apply to a transition into `to`: the hooks keyed
    /// on `to` first, then the common hooks, each list in registration order.
    pub fn pre_write_hooks_for(&self, to: &S) -> impl Iterator<Item = &PreWriteHook<E>> {
        self.pre_write_hooks
            .get(to)
            .into_iter()
            .flatten()
            .chain(self.common_pre_write_hooks.iter())
    }

    /// Commit hooks that apply to a committed change into `to`, keyed hooks
    /// first, then common hooks, each list in registration order.
    pub fn commit_hooks_for(&self, to: &S) -> impl Iterator<Item = &CommitHook<E>> {
        self.commit_hooks
            .get(to)
            .into_iter()
            .flatten()
            .chain(self.common_commit_hooks.iter())
    }
}

impl<S: StateToken, E> fmt::Debug for Ruleset<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ruleset")
            .field("attribute", &self.attribute)
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
