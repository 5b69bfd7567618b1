//! Permission table: the set of active grants.
//!
//! Each (record, viewer) pair is either granted or ungranted. Grant and
//! revoke are both idempotent; there is no pending state in between.

use std::collections::BTreeMap;

use attest_registry_core::{BlockHeight, Principal, RecordId};

use crate::authority::Evaluator;
use crate::grant::{GrantKey, GrantOutcome, PermissionGrant, RevokeOutcome};

/// All active grants, ordered by `(record_id, viewer)`.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    grants: BTreeMap<GrantKey, PermissionGrant>,
}

impl PermissionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table from a list of grants. Later duplicates are ignored.
    pub fn from_grants(grants: impl IntoIterator<Item = PermissionGrant>) -> Self {
        let mut table = Self::new();
        for grant in grants {
            table.grants.entry(grant.key()).or_insert(grant);
        }
        table
    }

    /// Borrow an evaluator for the given administrator.
    pub fn evaluator<'a>(&'a self, admin: &'a Principal) -> Evaluator<'a> {
        Evaluator::new(self, admin)
    }

    /// Grant `viewer` read access to `record_id`.
    pub fn grant(&mut self, record_id: RecordId, viewer: Principal, at: BlockHeight) -> GrantOutcome {
        let key = GrantKey::new(record_id, viewer);
        if self.grants.contains_key(&key) {
            return GrantOutcome::AlreadyGranted;
        }

        self.grants
            .insert(key, PermissionGrant::new(record_id, viewer, at));
        GrantOutcome::Granted
    }

    /// Remove `viewer`'s grant on `record_id`, if any.
    pub fn revoke(&mut self, record_id: RecordId, viewer: &Principal) -> RevokeOutcome {
        match self.grants.remove(&GrantKey::new(record_id, *viewer)) {
            Some(_) => RevokeOutcome::Revoked,
            None => RevokeOutcome::NotGranted,
        }
    }

    /// Whether `viewer` holds a grant on `record_id`.
    ///
    /// This looks at the table only; it does not know whether the record
    /// still exists.
    pub fn is_granted(&self, record_id: RecordId, viewer: &Principal) -> bool {
        self.grants
            .get(&GrantKey::new(record_id, *viewer))
            .is_some_and(|g| g.authorized)
    }

    /// Get a grant.
    pub fn get(&self, record_id: RecordId, viewer: &Principal) -> Option<&PermissionGrant> {
        self.grants.get(&GrantKey::new(record_id, *viewer))
    }

    /// Number of grants, including orphaned ones.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Iterate grants in key order.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionGrant> {
        self.grants.values()
    }

    /// Count grants whose record no longer exists.
    pub fn count_orphans(&self, record_exists: impl Fn(RecordId) -> bool) -> usize {
        self.grants
            .keys()
            .filter(|key| !record_exists(key.record_id))
            .count()
    }

    /// Delete grants whose record no longer exists. Returns how many went.
    pub fn sweep_orphans(&mut self, record_exists: impl Fn(RecordId) -> bool) -> usize {
        let before = self.grants.len();
        self.grants.retain(|key, _| record_exists(key.record_id));
        let removed = before - self.grants.len();

        if removed > 0 {
            tracing::info!(removed, "swept orphaned grants");
        }
        removed
    }
}
