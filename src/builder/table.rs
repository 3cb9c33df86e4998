//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::rule::RuleBuilder;
use crate::core::{TransitionRule, TransitionTable, DEFAULT_INITIAL_STATE, DEFAULT_STATE_FIELD};

/// Builder for constructing transition tables with a fluent API.
///
/// # Example
///
/// ```rust
/// use fieldstate::builder::{RuleBuilder, TableBuilder};
///
/// let table = TableBuilder::new()
///     .initial("draft")
///     .track_history(true)
///     .transition(RuleBuilder::new().from("draft").to("submitted").on("submit"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(table.initial_state(), "draft");
/// assert!(table.tracks_history());
/// ```
#[derive(Clone, Debug)]
pub struct TableBuilder {
    initial: String,
    state_field: String,
    track_history: bool,
    rules: Vec<TransitionRule>,
}

impl TableBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            initial: DEFAULT_INITIAL_STATE.to_string(),
            state_field: DEFAULT_STATE_FIELD.to_string(),
            track_history: false,
            rules: Vec::new(),
        }
    }

    /// Set the initial state.
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = state.into();
        self
    }

    /// Set the name of the entity field holding the state.
    pub fn state_field(mut self, field: impl Into<String>) -> Self {
        self.state_field = field.into();
        self
    }

    /// Enable or disable per-state entry timestamps.
    pub fn track_history(mut self, enabled: bool) -> Self {
        self.track_history = enabled;
        self
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder is incomplete.
    pub fn transition(mut self, builder: RuleBuilder) -> Result<Self, BuildError> {
        self.rules.push(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn rule(mut self, rule: TransitionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple rules at once, keeping their order.
    pub fn rules(mut self, rules: impl IntoIterator<Item = TransitionRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validate and build the table.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        TransitionTable::assemble(
            self.initial,
            self.state_field,
            self.track_history,
            self.rules,
        )
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::TableViolation;

    #[test]
    fn defaults_match_table_defaults() {
        let table = TableBuilder::new().build().unwrap();

        assert_eq!(table.initial_state(), DEFAULT_INITIAL_STATE);
        assert_eq!(table.state_field_name(), DEFAULT_STATE_FIELD);
        assert!(!table.tracks_history());
    }

    #[test]
    fn incomplete_rule_is_rejected_early() {
        let result = TableBuilder::new().transition(RuleBuilder::new().from("draft"));

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn build_reports_every_violation() {
        let result = TableBuilder::new()
            .initial("")
            .rule(TransitionRule::new(["draft"], "", "submit"))
            .rule(TransitionRule::new(["draft"], "submitted", ""))
            .build();

        match result {
            Err(BuildError::InvalidTable(found)) => {
                assert_eq!(found.len(), 3);
                assert!(found.contains(&TableViolation::EmptyInitialState));
                assert!(found.contains(&TableViolation::EmptyTo { index: 0 }));
                assert!(found.contains(&TableViolation::EmptyAction { index: 1 }));
            }
            other => panic!("expected invalid table, got {other:?}"),
        }
    }

    #[test]
    fn rules_keep_declaration_order() {
        let table = TableBuilder::new()
            .initial("draft")
            .rules(vec![
                TransitionRule::new(["draft"], "submitted", "submit"),
                TransitionRule::new(["submitted"], "approved", "approve"),
            ])
            .state_field("status")
            .build()
            .unwrap();

        let actions: Vec<&str> = table.transitions().iter().map(|r| r.action()).collect();
        assert_eq!(actions, vec!["submit", "approve"]);
        assert_eq!(table.state_field_name(), "status");
    }
}
