//! Whole-registry snapshots.
//!
//! A snapshot carries the configuration, the store content and every grant,
//! orphaned ones included, so that restoring it reproduces the same state
//! digest.

use serde::{Deserialize, Serialize};

use attest_registry_perms::{GrantKey, PermissionGrant};
use attest_registry_store::{self as store, Result, StoreError, StoreSnapshot};

use crate::config::RegistryConfig;

/// Serializable registry state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub config: RegistryConfig,
    pub store: StoreSnapshot,
    /// Grants in `(record_id, viewer)` order.
    pub grants: Vec<PermissionGrant>,
}

impl RegistrySnapshot {
    /// Check the parts of the snapshot the store does not: the counter
    /// against the configured start, and the grant list.
    ///
    /// Grants must be in strictly ascending `(record_id, viewer)` order,
    /// name only ids the counter has issued, and be authorized.
    pub(crate) fn check(&self) -> Result<()> {
        let last = self.store.last_record_id;
        if last < self.config.initial_counter() {
            return Err(StoreError::InvalidData(format!(
                "counter {last} is below the configured start {}",
                self.config.initial_record_id
            )));
        }

        let mut previous: Option<GrantKey> = None;
        for grant in &self.grants {
            let key = grant.key();

            if grant.record_id > last {
                return Err(StoreError::CounterBehind {
                    record_id: grant.record_id,
                    last,
                });
            }

            match previous {
                Some(prev) if prev == key => {
                    return Err(StoreError::InvalidData(format!(
                        "duplicate grant on record {} for {}",
                        key.record_id, key.viewer
                    )))
                }
                Some(prev) if prev > key => {
                    return Err(StoreError::InvalidData(format!(
                        "grants out of order: record {} for {} after record {} for {}",
                        key.record_id, key.viewer, prev.record_id, prev.viewer
                    )))
                }
                _ => {}
            }
            previous = Some(key);

            if !grant.authorized {
                return Err(StoreError::InvalidData(format!(
                    "grant on record {} for {} is not authorized",
                    grant.record_id, grant.viewer
                )));
            }
        }
        Ok(())
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        store::to_cbor(self)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        store::from_cbor(bytes)
    }

    /// Pretty-printed JSON, for inspection.
    pub fn to_json(&self) -> Result<String> {
        store::to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        store::from_json(json)
    }
}
