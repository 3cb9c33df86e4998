//! In-memory persistence collaborator.

use super::{Persistence, PersistenceError, Record};
use std::collections::HashMap;
use uuid::Uuid;

/// Stores [`Record`]s in memory as `bincode`-encoded rows keyed by id.
///
/// Writes can be made to fail on demand, which is how the engine's
/// behavior on a failed save is exercised in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: HashMap<Uuid, Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Load the stored copy of a record.
    ///
    /// Rows that cannot be decoded are reported as missing.
    pub fn find(&self, id: Uuid) -> Option<Record> {
        let bytes = self.rows.get(&id)?;
        match bincode::deserialize(bytes) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(record_id = %id, error = %error, "Stored row could not be decoded");
                None
            }
        }
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Persistence<Record> for MemoryStore {
    fn is_persisted(&self, entity: &Record) -> bool {
        self.rows.contains_key(&entity.id())
    }

    fn write(&mut self, entity: &Record) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Unavailable(
                "writes are disabled".to_string(),
            ));
        }
        let bytes = bincode::serialize(entity).map_err(|e| PersistenceError::Encoding {
            id: entity.id(),
            reason: e.to_string(),
        })?;
        self.rows.insert(entity.id(), bytes);
        self.writes += 1;
        Ok(())
    }
}
