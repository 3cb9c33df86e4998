//! A general-purpose entity.

use crate::core::{Entity, StateHistory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A record with identity, named string attributes, and an optional
/// `state_change_at` history column.
///
/// Useful when the integrator has no domain struct of its own, and as the
/// unit stored by [`MemoryStore`](crate::store::MemoryStore).
///
/// # Example
///
/// ```rust
/// use fieldstate::core::Entity;
/// use fieldstate::store::Record;
///
/// let mut invoice = Record::new().with_attribute("customer", "acme");
/// invoice.set_field("state", "draft".to_string());
///
/// assert_eq!(invoice.field("customer"), Some("acme"));
/// assert_eq!(invoice.field("state"), Some("draft"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: Uuid,
    attributes: BTreeMap<String, String>,
    state_change_at: Option<StateHistory>,
}

impl Record {
    /// New record with a random identity and no attributes.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            attributes: BTreeMap::new(),
            state_change_at: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The history column, if anything has been recorded in it.
    pub fn state_change_at(&self) -> Option<&StateHistory> {
        self.state_change_at.as_ref()
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Record {
    fn field(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_field(&mut self, name: &str, value: String) {
        self.attributes.insert(name.to_string(), value);
    }

    fn state_history(&self) -> Option<&StateHistory> {
        self.state_change_at.as_ref()
    }

    fn state_history_mut(&mut self) -> Option<&mut StateHistory> {
        Some(self.state_change_at.get_or_insert_with(StateHistory::new))
    }
}
