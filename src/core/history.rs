//! Per-state entry timestamps.
//!
//! The history is a plain mapping from state name to the moment the entity
//! most recently entered that state. Timestamps are stored as W3C / RFC 3339
//! strings so the map serializes to something any persistence layer can
//! keep in a JSON column.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from state name to the timestamp of its most recent entry.
///
/// Entering a state again overwrites its timestamp; entries for other
/// states are kept. Reads are best-effort: a missing or unparseable entry
/// is reported as absent, never as an error.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::StateHistory;
/// use chrono::{TimeZone, Utc};
///
/// let mut history = StateHistory::new();
/// let entered = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
///
/// history.record_entry("submitted", entered);
///
/// assert_eq!(history.entry_timestamp_of("submitted"), Some(entered));
/// assert_eq!(history.entry_timestamp_of("approved"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateHistory {
    entries: BTreeMap<String, String>,
}

impl StateHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `state` as entered at `now`, replacing any earlier entry.
    pub fn record_entry(&mut self, state: &str, now: DateTime<Utc>) {
        self.entries.insert(
            state.to_string(),
            now.to_rfc3339_opts(SecondsFormat::Secs, false),
        );
    }

    /// When `state` was most recently entered.
    ///
    /// Returns `None` if the state was never entered or the stored value
    /// cannot be parsed.
    pub fn entry_timestamp_of(&self, state: &str) -> Option<DateTime<Utc>> {
        self.entries.get(state).and_then(|raw| parse_timestamp(raw))
    }

    /// Raw stored value for `state`, exactly as persisted.
    pub fn raw_entry(&self, state: &str) -> Option<&str> {
        self.entries.get(state).map(String::as_str)
    }

    /// Insert a raw, unparsed value. Used when hydrating from storage.
    pub fn insert_raw(&mut self, state: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(state.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
