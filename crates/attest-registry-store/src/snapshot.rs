//! Store snapshots and their encodings.
//!
//! A snapshot is the full content of a store: the counter and every live
//! record. Snapshots encode to compact CBOR or to JSON for inspection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use attest_registry_core::{Record, RecordId};

use crate::error::{Result, StoreError};

/// Serializable store content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Most recently issued record id.
    pub last_record_id: RecordId,

    /// Live records, in id order.
    pub records: Vec<Record>,
}

impl StoreSnapshot {
    /// Check the snapshot against the record invariants.
    pub fn check(&self) -> Result<()> {
        let mut previous: Option<RecordId> = None;

        for record in &self.records {
            let id = record.record_id();

            if id > self.last_record_id {
                return Err(StoreError::CounterBehind {
                    record_id: id,
                    last: self.last_record_id,
                });
            }

            if id == RecordId::default() {
                return Err(StoreError::InvalidData("record id 0 is never issued".into()));
            }

            match previous {
                Some(prev) if prev == id => return Err(StoreError::Duplicate(id)),
                Some(prev) if prev > id => {
                    return Err(StoreError::InvalidData(format!(
                        "records out of order: {id} after {prev}"
                    )))
                }
                _ => {}
            }
            previous = Some(id);

            record
                .validate()
                .map_err(|source| StoreError::InvalidRecord {
                    record_id: id,
                    source,
                })?;
        }

        Ok(())
    }
}

/// Encode a value to CBOR bytes.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}

/// Decode a value from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Encode a value to pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode a value from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
}
