//! Errors raised while encoding, decoding, or restoring checkpoints.

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Wire format of a checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Binary,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Binary => f.write_str("binary"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint as {format}: {reason}")]
    Encode { format: Format, reason: String },

    #[error("Could not decode {format} checkpoint: {reason}")]
    Decode { format: Format, reason: String },

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The record's state is not declared by the table it is restored
    /// against.
    #[error("Record {record_id} is in state '{state}', which the table does not declare")]
    UnknownState { record_id: Uuid, state: String },
}
