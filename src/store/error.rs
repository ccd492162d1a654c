use chrono::NaiveDateTime;

use crate::records::StatusError;

/// Errors that can occur while reading, writing or updating the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error on the snapshot file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Temporary snapshot could not replace the target file
    #[error("Failed to persist snapshot: {0}")]
    PersistError(#[from] tempfile::PersistError),

    /// A run refers to a record that is not stored
    #[error("No stored {kind} at {date}")]
    MissingRecord {
        /// Record kind ("log" or "PA line")
        kind: &'static str,
        /// Natural key looked up
        date: NaiveDateTime,
    },

    /// A run refers to a record that another run already claimed
    #[error("Stored {kind} at {date} is already matched: {source}")]
    AlreadyMatched {
        /// Record kind ("log" or "PA line")
        kind: &'static str,
        /// Natural key of the record
        date: NaiveDateTime,
        /// Rejected transition
        source: StatusError,
    },
}
