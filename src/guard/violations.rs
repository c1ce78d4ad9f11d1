//! Field-level validation violations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single save-time validation failure on the guarded attribute.
///
/// These are the errors that reject a save at the validation boundary. They
/// carry plain string tokens so callers can attach them to whatever
/// field-level error reporting their persistence layer uses.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Violation {
    /// The value is outside the declared state set.
    #[error("'{value}' is not a valid {attribute}")]
    Domain { attribute: String, value: String },

    /// The value changed along a pair no transition rule permits.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        attribute: String,
        from: String,
        to: String,
    },
}

/// Attribute-scoped collection of violations from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violations {
    attribute: String,
    items: Vec<Violation>,
}

impl Violations {
    pub(crate) fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            items: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.items.push(violation);
    }

    /// The attribute this collection is scoped to.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.items.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
