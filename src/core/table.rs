//! Immutable transition table configuration.

use super::rule::TransitionRule;
use crate::builder::BuildError;
use crate::validation::validate_table;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use thiserror::Error;

/// Initial state used when a table does not configure one.
pub const DEFAULT_INITIAL_STATE: &str = "initiated";

/// Name of the entity field holding the current state when a table does
/// not configure one.
pub const DEFAULT_STATE_FIELD: &str = "state";

/// Errors raised while loading a table definition.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse transition table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] BuildError),
}

/// Ordered set of transition rules for one entity type, plus the settings
/// that go with them.
///
/// A table is validated when it is built and never changes afterwards.
/// Rule order is significant: lookups resolve to the first matching rule.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::{TransitionRule, TransitionTable};
///
/// let table = TransitionTable::new(
///     "draft",
///     vec![
///         TransitionRule::new(["draft"], "submitted", "submit"),
///         TransitionRule::new(["submitted"], "approved", "approve"),
///     ],
/// )
/// .unwrap();
///
/// assert!(table.is_known_state("approved"));
/// assert!(table.is_known_action("submit"));
/// assert_eq!(table.state_field_name(), "state");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionTable {
    initial_state: String,
    state_field: String,
    track_history: bool,
    transitions: Vec<TransitionRule>,
}

#[derive(Deserialize)]
struct TableDefinition {
    #[serde(default = "default_initial_state")]
    initial_state: String,
    #[serde(default = "default_state_field")]
    state_field: String,
    #[serde(default)]
    track_history: bool,
    #[serde(default)]
    transitions: Vec<TransitionRule>,
}

fn default_initial_state() -> String {
    DEFAULT_INITIAL_STATE.to_string()
}

fn default_state_field() -> String {
    DEFAULT_STATE_FIELD.to_string()
}

impl TransitionTable {
    /// Build a table with the default state field and history tracking off.
    pub fn new(
        initial_state: impl Into<String>,
        transitions: Vec<TransitionRule>,
    ) -> Result<Self, BuildError> {
        Self::assemble(
            initial_state.into(),
            DEFAULT_STATE_FIELD.to_string(),
            false,
            transitions,
        )
    }

    pub(crate) fn assemble(
        initial_state: String,
        state_field: String,
        track_history: bool,
        transitions: Vec<TransitionRule>,
    ) -> Result<Self, BuildError> {
        match validate_table(&initial_state, &state_field, &transitions) {
            Validation::Success(_) => Ok(Self {
                initial_state,
                state_field,
                track_history,
                transitions,
            }),
            Validation::Failure(errors) => {
                Err(BuildError::InvalidTable(errors.iter().cloned().collect()))
            }
        }
    }

    /// Load and validate a table from its JSON definition.
    ///
    /// Missing settings fall back to their defaults.
    ///
    /// ```rust
    /// use fieldstate::core::TransitionTable;
    ///
    /// let table = TransitionTable::from_json(r#"{
    ///     "track_history": true,
    ///     "transitions": [
    ///         { "from": "initiated", "to": "paid", "on": "markPaid" }
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(table.initial_state(), "initiated");
    /// assert!(table.tracks_history());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let definition: TableDefinition = serde_json::from_str(json)?;
        Ok(Self::assemble(
            definition.initial_state,
            definition.state_field,
            definition.track_history,
            definition.transitions,
        )?)
    }

    /// Rules in declaration order.
    pub fn transitions(&self) -> &[TransitionRule] {
        &self.transitions
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn state_field_name(&self) -> &str {
        &self.state_field
    }

    /// Whether per-state entry timestamps are recorded.
    pub fn tracks_history(&self) -> bool {
        self.track_history
    }

    /// Whether `name` is the initial state or appears in any rule.
    pub fn is_known_state(&self, name: &str) -> bool {
        name == self.initial_state
            || self
                .transitions
                .iter()
                .any(|rule| rule.to() == name || rule.applies_from(name))
    }

    /// Whether any rule is triggered by `name`.
    pub fn is_known_action(&self, name: &str) -> bool {
        self.transitions.iter().any(|rule| rule.action() == name)
    }

    /// All known states, initial first, then in order of appearance.
    pub fn known_states(&self) -> Vec<&str> {
        let mut states = vec![self.initial_state.as_str()];
        for rule in &self.transitions {
            for state in rule
                .from_states()
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(rule.to()))
            {
                if !states.contains(&state) {
                    states.push(state);
                }
            }
        }
        states
    }

    /// All known actions in order of first declaration.
    pub fn known_actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = Vec::new();
        for rule in &self.transitions {
            if !actions.contains(&rule.action()) {
                actions.push(rule.action());
            }
        }
        actions
    }

    /// Known states that never appear as a source state.
    pub fn terminal_states(&self) -> Vec<&str> {
        self.known_states()
            .into_iter()
            .filter(|state| !self.transitions.iter().any(|rule| rule.applies_from(state)))
            .collect()
    }

    /// First rule, in declaration order, that `action` fires from `state`.
    pub fn rule_for(&self, action: &str, state: &str) -> Option<&TransitionRule> {
        self.transitions
            .iter()
            .find(|rule| rule.action() == action && rule.applies_from(state))
    }
}
