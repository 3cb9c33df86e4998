//! Build errors for transition tables and rules.

use crate::validation::TableViolation;
use thiserror::Error;

/// Errors that can occur when building transition tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Transition source states not specified. Call .from(states)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition action not specified. Call .on(action)")]
    MissingAction,

    #[error("Transition table is invalid: {}", describe(.0))]
    InvalidTable(Vec<TableViolation>),
}

fn describe(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
