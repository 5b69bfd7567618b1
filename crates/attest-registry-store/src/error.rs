//! Error types for the store module.

use attest_registry_core::{RecordId, ValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Two records share an id.
    #[error("duplicate record: {0}")]
    Duplicate(RecordId),

    /// A stored record violates a field bound.
    #[error("record {record_id} is invalid: {source}")]
    InvalidRecord {
        record_id: RecordId,
        #[source]
        source: ValidationError,
    },

    /// A record id was issued past the counter.
    #[error("record {record_id} is beyond the last issued id {last}")]
    CounterBehind { record_id: RecordId, last: RecordId },

    /// Snapshot serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid data in a snapshot.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
