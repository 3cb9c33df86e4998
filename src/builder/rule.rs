//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::TransitionRule;

/// Builder for constructing rules with a fluent API.
#[derive(Clone, Debug, Default)]
pub struct RuleBuilder {
    from: Vec<String>,
    to: Option<String>,
    action: Option<String>,
}

impl RuleBuilder {
    /// Create a new rule builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source state (at least one is required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from.push(state.into());
        self
    }

    /// Add several source states at once.
    pub fn from_any<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.from.extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Set the triggering action (required).
    pub fn on(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Build the rule.
    ///
    /// Only checks that every part was supplied; content checks happen when
    /// the rule joins a table.
    pub fn build(self) -> Result<TransitionRule, BuildError> {
        if self.from.is_empty() {
            return Err(BuildError::MissingFromState);
        }
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let action = self.action.ok_or(BuildError::MissingAction)?;

        Ok(TransitionRule::new(self.from, to, action))
    }
}
