//! Builder API for ergonomic table construction.
//!
//! This module provides fluent builders and a macro for declaring
//! transition tables with minimal boilerplate. Every path ends in the same
//! validation, so a built table is always well formed.

pub mod error;
pub mod macros;
pub mod rule;
pub mod table;

pub use error::BuildError;
pub use rule::RuleBuilder;
pub use table::TableBuilder;

use crate::core::TransitionRule;

/// Create a rule from a single source state.
///
/// # Example
///
/// ```
/// use fieldstate::builder::simple_rule;
///
/// let rule = simple_rule("draft", "submitted", "submit");
/// assert!(rule.applies_from("draft"));
/// ```
pub fn simple_rule(from: &str, to: &str, action: &str) -> TransitionRule {
    TransitionRule::new([from], to, action)
}
