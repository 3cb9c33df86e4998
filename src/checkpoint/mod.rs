//! Versioned snapshots of records.
//!
//! A checkpoint captures a [`Record`] (attributes, current state, and
//! history) so it can be shipped or archived outside the persistence
//! collaborator and restored later against the same transition table.

use crate::core::{Entity, StateField, TransitionTable};
use crate::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, Format};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When the checkpoint was taken
    pub taken_at: DateTime<Utc>,

    /// The captured record
    pub record: Record,
}

impl Checkpoint {
    /// Snapshot `record`, stamping the checkpoint with `taken_at`.
    ///
    /// Pass the machine's clock reading (see [`StateMachine::now`]) so
    /// checkpoints and history entries share one time source.
    ///
    /// [`StateMachine::now`]: crate::machine::StateMachine::now
    pub fn capture(record: &Record, taken_at: DateTime<Utc>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            taken_at,
            record: record.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Encode {
            format: Format::Json,
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json).map_err(|e| CheckpointError::Decode {
            format: Format::Json,
            reason: e.to_string(),
        })?;
        checkpoint.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode {
            format: Format::Binary,
            reason: e.to_string(),
        })
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode {
            format: Format::Binary,
            reason: e.to_string(),
        })?;
        checkpoint.check_version()
    }

    /// Hand the record back, checking its state against `table`.
    ///
    /// An unset state is accepted (it will default to the initial state on
    /// first use); a state the table does not know is rejected.
    pub fn restore(self, table: &TransitionTable) -> Result<Record, CheckpointError> {
        let field = StateField::new(table);
        if let Some(state) = self.record.field(field.name()).filter(|s| !s.is_empty()) {
            if !table.is_known_state(state) {
                return Err(CheckpointError::UnknownState {
                    record_id: self.record.id(),
                    state: state.to_string(),
                });
            }
        }
        tracing::debug!(
            checkpoint_id = %self.id,
            record_id = %self.record.id(),
            "Restored record from checkpoint"
        );
        Ok(self.record)
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionRule;
    use chrono::TimeZone;

    fn table() -> TransitionTable {
        TransitionTable::new(
            "draft",
            vec![TransitionRule::new(["draft"], "submitted", "submit")],
        )
        .unwrap()
    }

    fn taken_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 2, 9, 30, 0).unwrap()
    }

    fn submitted_record() -> Record {
        let mut record = Record::new().with_attribute("title", "Q3 report");
        record.set_field("state", "submitted".to_string());
        if let Some(history) = record.state_history_mut() {
            history.insert_raw("submitted", "2024-07-01T10:00:00+00:00");
        }
        record
    }

    #[test]
    fn json_checkpoint_restores_record() {
        let record = submitted_record();
        let json = Checkpoint::capture(&record, taken_at()).to_json().unwrap();

        let decoded = Checkpoint::from_json(&json).unwrap();
        assert_eq!(decoded.taken_at, taken_at());

        let restored = decoded.restore(&table()).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn binary_checkpoint_restores_record() {
        let record = submitted_record();
        let bytes = Checkpoint::capture(&record, taken_at()).to_binary().unwrap();

        let restored = Checkpoint::from_binary(&bytes).unwrap().restore(&table()).unwrap();

        assert_eq!(restored.field("state"), Some("submitted"));
        assert_eq!(restored.state_change_at(), record.state_change_at());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = Checkpoint::capture(&Record::new(), taken_at());
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let json = checkpoint.to_json().unwrap();

        assert!(matches!(
            Checkpoint::from_json(&json),
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn unknown_state_is_rejected_on_restore() {
        let mut record = Record::new();
        record.set_field("state", "archived".to_string());

        let result = Checkpoint::capture(&record, taken_at()).restore(&table());

        match result {
            Err(CheckpointError::UnknownState { record_id, state }) => {
                assert_eq!(record_id, record.id());
                assert_eq!(state, "archived");
            }
            other => panic!("expected unknown state, got {other:?}"),
        }
    }

    #[test]
    fn unset_state_is_accepted() {
        let record = Record::new();

        assert!(Checkpoint::capture(&record, taken_at()).restore(&table()).is_ok());
    }

    #[test]
    fn garbage_input_fails_to_decode() {
        assert!(matches!(
            Checkpoint::from_json("{}"),
            Err(CheckpointError::Decode { format: Format::Json, .. })
        ));
        assert!(matches!(
            Checkpoint::from_binary(&[1, 2, 3]),
            Err(CheckpointError::Decode { format: Format::Binary, .. })
        ));
    }
}
