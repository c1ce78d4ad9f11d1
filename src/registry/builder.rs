//! Builder for declaring transition rules and hooks.

use crate::registry::error::BuildError;
use crate::registry::hooks::{CommitHook, HookError, PreWriteHook};
use crate::registry::ruleset::Ruleset;
use crate::state::StateToken;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Builder for a [`Ruleset`], used during the single declaration phase.
///
/// Declaration is an explicit call sequence at entity-type definition time:
/// permit the transitions, attach the hooks, then `build()`. The result is
/// immutable; there is no way to add a rule after construction.
///
/// # Example
///
/// ```rust
/// use stategate::RulesetBuilder;
///
/// let rules = RulesetBuilder::<&'static str, ()>::new("state")
///     .permit_transition("registered", "active")
///     .permit_transition("active", "banned")
///     .permit_transition("banned", "active")
///     .build()
///     .unwrap();
///
/// assert!(rules.is_permitted(&"banned", &"active"));
/// assert!(!rules.is_permitted(&"banned", &"registered"));
/// ```
pub struct RulesetBuilder<S: StateToken, E> {
    attribute: String,
    states: HashSet<S>,
    transitions: HashMap<S, HashSet<S>>,
    pre_write_hooks: HashMap<S, Vec<PreWriteHook<E>>>,
    commit_hooks: HashMap<S, Vec<CommitHook<E>>>,
    common_pre_write_hooks: Vec<PreWriteHook<E>>,
    common_commit_hooks: Vec<CommitHook<E>>,
}

impl<S: StateToken, E> RulesetBuilder<S, E> {
    /// Start declaring rules for the named attribute.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            states: HashSet::new(),
            transitions: HashMap::new(),
            pre_write_hooks: HashMap::new(),
            commit_hooks: HashMap::new(),
            common_pre_write_hooks: Vec::new(),
            common_commit_hooks: Vec::new(),
        }
    }

    /// Permit the directed transition `from -> to`.
    ///
    /// Both endpoints join the declared state set. Declaring the same pair
    /// twice has no additional effect, and calls may come in any order.
    pub fn permit_transition(mut self, from: S, to: S) -> Self {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.transitions.entry(from).or_default().insert(to);
        self
    }

    /// Run `hook` after validation, before the flush, whenever the attribute
    /// transitions into `target`. Hooks for the same target run in
    /// registration order.
    pub fn on_pre_write<F>(mut self, target: S, hook: F) -> Self
    where
        F: Fn(&mut E) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.pre_write_hooks
            .entry(target)
            .or_default()
            .push(Arc::new(hook));
        self
    }

    /// Run `hook` once the transaction carrying a transition into `target`
    /// has durably committed.
    pub fn on_commit<F>(mut self, target: S, hook: F) -> Self
    where
        F: Fn(&E) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.commit_hooks
            .entry(target)
            .or_default()
            .push(Arc::new(hook));
        self
    }

    /// Run `hook` before the flush of every transition, whatever the target.
    /// Common hooks run after the target-keyed hooks.
    pub fn on_any_pre_write<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut E) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.common_pre_write_hooks.push(Arc::new(hook));
        self
    }

    /// Run `hook` after every committed transition, whatever the target.
    pub fn on_any_commit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&E) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.common_commit_hooks.push(Arc::new(hook));
        self
    }

    /// Build the immutable ruleset.
    ///
    /// Fails if no transition was declared, or if a keyed hook targets a
    /// state no transition mentions.
    pub fn build(self) -> Result<Ruleset<S, E>, BuildError> {
        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions {
                attribute: self.attribute,
            });
        }

        for target in self.pre_write_hooks.keys().chain(self.commit_hooks.keys()) {
            if !self.states.contains(target) {
                return Err(BuildError::UndeclaredHookState {
                    attribute: self.attribute,
                    state: target.token().to_string(),
                });
            }
        }

        Ok(Ruleset {
            attribute: self.attribute,
            states: self.states,
            transitions: self.transitions,
            pre_write_hooks: self.pre_write_hooks,
            commit_hooks: self.commit_hooks,
            common_pre_write_hooks: self.common_pre_write_hooks,
            common_commit_hooks: self.common_commit_hooks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_transitions() {
        let result = RulesetBuilder::<&'static str, ()>::new("state").build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::NoTransitions {
                attribute: "state".to_string()
            }
        );
    }

    #[test]
    fn states_are_exactly_the_transition_endpoints() {
        let rules = RulesetBuilder::<&'static str, ()>::new("state")
            .permit_transition("registered", "active")
            .permit_transition("active", "deleted")
            .build()
            .unwrap();

        let mut states: Vec<&str> = rules.states().copied().collect();
        states.sort_unstable();
        assert_eq!(states, vec!["active", "deleted", "registered"]);
    }

    #[test]
    fn permitting_a_pair_twice_is_idempotent() {
        let once = RulesetBuilder::<&'static str, ()>::new("state")
            .permit_transition("a", "b")
            .build()
            .unwrap();
        let twice = RulesetBuilder::<&'static str, ()>::new("state")
            .permit_transition("a", "b")
            .permit_transition("a", "b")
            .build()
            .unwrap();

        assert_eq!(once.is_permitted(&"a", &"b"), twice.is_permitted(&"a", &"b"));
        assert_eq!(once.states().count(), twice.states().count());
    }

    #[test]
    fn hook_for_unmentioned_state_fails_the_build() {
        let result = RulesetBuilder::<&'static str, ()>::new("state")
            .permit_transition("a", "b")
            .on_commit("c", |_: &()| Ok(()))
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::UndeclaredHookState {
                attribute: "state".to_string(),
                state: "c".to_string(),
            }
        );
    }

    #[test]
    fn common_hooks_do_not_constrain_the_state_set() {
        let result = RulesetBuilder::<&'static str, ()>::new("state")
            .permit_transition("a", "b")
            .on_any_commit(|_: &()| Ok(()))
            .build();

        assert!(result.is_ok());
    }
}
