//! A single declared transition.

use serde::{Deserialize, Deserializer, Serialize};

/// Declaration of which states an action is legal from and which state it
/// leads to.
///
/// Rules are plain data. Their invariants (non-empty `from`, non-empty
/// `action`, a single `to`) are checked when a
/// [`TransitionTable`](crate::core::TransitionTable) is assembled, so a
/// table never holds a malformed rule.
///
/// When deserialized, `action` may also be spelled `on`, and `from` may be
/// a single string instead of a list.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::TransitionRule;
///
/// let rule = TransitionRule::new(["draft", "rejected"], "submitted", "submit");
///
/// assert!(rule.applies_from("draft"));
/// assert!(rule.applies_from("rejected"));
/// assert!(!rule.applies_from("submitted"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    #[serde(deserialize_with = "one_or_many")]
    from: Vec<String>,
    to: String,
    #[serde(alias = "on")]
    action: String,
}

impl TransitionRule {
    /// Declare a rule moving from any of `from` to `to` when `action` fires.
    pub fn new<I, F>(from: I, to: impl Into<String>, action: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            from: from.into_iter().map(Into::into).collect(),
            to: to.into(),
            action: action.into(),
        }
    }

    /// States this rule may fire from.
    pub fn from_states(&self) -> &[String] {
        &self.from
    }

    /// State this rule leads to.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Name of the action that triggers this rule.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Whether `state` is one of this rule's source states.
    pub fn applies_from(&self, state: &str) -> bool {
        self.from.iter().any(|s| s == state)
    }

    /// Whether this rule shares at least one source state with `other`.
    pub fn overlaps(&self, other: &TransitionRule) -> bool {
        self.from.iter().any(|s| other.applies_from(s))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(state) => vec![state],
        OneOrMany::Many(states) => states,
    })
}
