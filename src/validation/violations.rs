//! Findings reported by transition table validation.

use thiserror::Error;

/// A single problem found while validating a transition table.
///
/// `index` is the position of the offending rule in declaration order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("Rule {index} has no source states")]
    EmptyFrom { index: usize },

    #[error("Rule {index} has an empty source state name")]
    BlankFromState { index: usize },

    #[error("Rule {index} has an empty target state")]
    EmptyTo { index: usize },

    #[error("Rule {index} has an empty action name")]
    EmptyAction { index: usize },

    #[error(
        "Rules {first} and {second} both fire '{action}' from a shared state but lead to '{first_to}' and '{second_to}'"
    )]
    ConflictingRules {
        action: String,
        first: usize,
        second: usize,
        first_to: String,
        second_to: String,
    },

    #[error("Initial state must not be empty")]
    EmptyInitialState,

    #[error("State field name must not be empty")]
    EmptyStateField,
}
