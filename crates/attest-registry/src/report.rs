//! Structured results returned by read-only registry operations.

use serde::{Deserialize, Serialize};

use attest_registry_core::{BlockHeight, Principal, RecordId, StateDigest};

/// Result of comparing a claimed controller against a record.
///
/// A mismatch is not an error: `success` reports that the comparison ran,
/// `verified` reports whether the claim held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationReport {
    pub success: bool,
    /// Height at which the comparison ran.
    pub timestamp: BlockHeight,
    /// Blocks since the record was registered.
    pub record_age: u64,
    pub verified: bool,
}

/// Administrator view of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub admin: Principal,
    pub block_height: BlockHeight,
    /// Most recently issued record id.
    pub last_record_id: RecordId,
    /// Live records.
    pub record_count: usize,
    /// All grants, orphaned ones included.
    pub grant_count: usize,
    /// Grants whose record has been terminated.
    pub orphaned_grants: usize,
    pub state_digest: StateDigest,
}
