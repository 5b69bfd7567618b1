//! Permission grants.
//!
//! A grant authorizes one viewer to read one record. Grants reference their
//! record by id only; a grant whose record is gone is inert.

use serde::{Deserialize, Serialize};

use attest_registry_core::{BlockHeight, Principal, RecordId};

/// An explicit read authorization for a (record, viewer) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// The record this grant applies to.
    pub record_id: RecordId,

    /// The principal allowed to read.
    pub viewer: Principal,

    /// Always true while the grant exists; absence means not authorized.
    pub authorized: bool,

    /// Height at which the grant was first made.
    pub granted_at: BlockHeight,
}

impl PermissionGrant {
    /// Create an active grant.
    pub fn new(record_id: RecordId, viewer: Principal, granted_at: BlockHeight) -> Self {
        Self {
            record_id,
            viewer,
            authorized: true,
            granted_at,
        }
    }

    /// The table key for this grant.
    pub fn key(&self) -> GrantKey {
        GrantKey {
            record_id: self.record_id,
            viewer: self.viewer,
        }
    }
}

/// Identity of a grant: the (record, viewer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GrantKey {
    pub record_id: RecordId,
    pub viewer: Principal,
}

impl GrantKey {
    pub fn new(record_id: RecordId, viewer: Principal) -> Self {
        Self { record_id, viewer }
    }
}

/// Outcome of a grant request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// A new grant was written.
    Granted,
    /// The viewer was already granted; nothing changed.
    AlreadyGranted,
}

/// Outcome of a revoke request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// An existing grant was removed.
    Revoked,
    /// There was no grant to remove.
    NotGranted,
}
