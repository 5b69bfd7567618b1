//! The Registry: unified API over records and permissions.
//!
//! Every operation resolves its record from the store, asks the permission
//! evaluator whether the caller may proceed, and only then writes. All
//! checks run before the first write, so a failed operation changes nothing.

use attest_registry_core::{
    Principal, Record, RecordFields, RecordId, RecordMetrics, RegistryError, Result,
    StateDigest, StateHasher, TxContext, ARCHIVED_TAG,
};
use attest_registry_perms::{
    require_controller, Authority, Evaluator, GrantOutcome, PermissionTable, RevokeOutcome,
};
use attest_registry_store::{InsertResult, MemoryStore, Store, StoreError, StoreExt};

use crate::config::RegistryConfig;
use crate::report::{AuthenticationReport, Diagnostics};
use crate::snapshot::RegistrySnapshot;

/// The main Registry struct.
///
/// Mutating operations take `&mut self`: the host applies them one at a
/// time, and the borrow checker holds it to that.
pub struct Registry<S: Store = MemoryStore> {
    /// Deployment settings, including the administrator.
    config: RegistryConfig,
    /// Record storage and the id counter.
    store: S,
    /// Read grants.
    permissions: PermissionTable,
}

impl Registry<MemoryStore> {
    /// Create an empty in-memory registry.
    pub fn new(config: RegistryConfig) -> Self {
        let store = MemoryStore::with_last_record_id(config.initial_counter());
        Self {
            config,
            store,
            permissions: PermissionTable::new(),
        }
    }

    /// Capture the full registry state.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            config: self.config.clone(),
            store: self.store.snapshot(),
            grants: self.permissions.iter().cloned().collect(),
        }
    }

    /// Rebuild a registry from a snapshot.
    pub fn restore(snapshot: RegistrySnapshot) -> std::result::Result<Self, StoreError> {
        snapshot.check()?;

        let store = MemoryStore::restore(snapshot.store)?;
        let permissions = PermissionTable::from_grants(snapshot.grants);

        tracing::info!(
            records = store.record_count(),
            grants = permissions.len(),
            "registry restored"
        );

        Ok(Self {
            config: snapshot.config,
            store,
            permissions,
        })
    }
}

impl<S: Store> Registry<S> {
    /// Create a registry over an existing store.
    ///
    /// The store's counter is raised to the configured initial value if it
    /// is behind; it is never lowered.
    pub fn with_store(config: RegistryConfig, mut store: S) -> Self {
        if store.last_record_id() < config.initial_counter() {
            store.set_last_record_id(config.initial_counter());
        }
        Self {
            config,
            store,
            permissions: PermissionTable::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn admin(&self) -> &Principal {
        &self.config.admin
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    fn evaluator(&self) -> Evaluator<'_> {
        self.permissions.evaluator(&self.config.admin)
    }

    fn load(&self, record_id: RecordId) -> Result<Record> {
        self.store
            .get_record(&record_id)
            .ok_or(RegistryError::RecordNotFound(record_id))
    }

    /// Load a record the caller controls.
    fn load_owned(&self, ctx: &TxContext, record_id: RecordId) -> Result<Record> {
        let record = self.load(record_id)?;
        require_controller(&record, &ctx.sender)?;
        Ok(record)
    }

    fn commit(&mut self, record: Record) -> Result<()> {
        self.store.replace_record(record).map_err(|e| match e {
            StoreError::NotFound(id) => RegistryError::RecordNotFound(id),
            other => RegistryError::RestrictedOperation(other.to_string()),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administrative Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Report registry-wide counters. Administrator only.
    pub fn diagnostics(&self, ctx: &TxContext) -> Result<Diagnostics> {
        self.evaluator().require_admin(&ctx.sender)?;

        Ok(Diagnostics {
            admin: self.config.admin,
            block_height: ctx.block_height,
            last_record_id: self.store.last_record_id(),
            record_count: self.store.record_count(),
            grant_count: self.permissions.len(),
            orphaned_grants: self
                .permissions
                .count_orphans(|id| self.store.has_record(&id)),
            state_digest: self.state_digest(),
        })
    }

    /// Delete grants left behind by terminated records. Administrator only.
    pub fn sweep_orphaned_grants(&mut self, ctx: &TxContext) -> Result<usize> {
        self.evaluator().require_admin(&ctx.sender)?;

        let store = &self.store;
        Ok(self
            .permissions
            .sweep_orphans(|id| store.has_record(&id)))
    }

    /// Digest of every record, every grant, and the id counter.
    pub fn state_digest(&self) -> StateDigest {
        let mut hasher = StateHasher::new(self.store.last_record_id());
        for record in self.store.records() {
            hasher.record(&record);
        }
        for grant in self.permissions.iter() {
            hasher.grant(grant.record_id, &grant.viewer);
        }
        hasher.finish()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new record controlled by the caller.
    ///
    /// Fields are checked in order label, weight, summary, tags. The caller
    /// is granted read access to the new record.
    pub fn register(&mut self, ctx: &TxContext, fields: RecordFields) -> Result<RecordId> {
        fields.validate()?;

        let record_id = self.store.peek_next_record_id().ok_or_else(|| {
            RegistryError::RestrictedOperation("record id space exhausted".into())
        })?;

        let record = Record::new(record_id, ctx.sender, ctx.block_height, fields);
        if self.store.insert_and_advance(record) == InsertResult::AlreadyExists {
            return Err(RegistryError::DuplicateEntry(record_id));
        }
        self.permissions
            .grant(record_id, ctx.sender, ctx.block_height);

        tracing::info!(%record_id, controller = %ctx.sender, "record registered");
        Ok(record_id)
    }

    /// Replace label, weight, summary and tags. Controller only.
    pub fn update(&mut self, ctx: &TxContext, record_id: RecordId, fields: RecordFields) -> Result<()> {
        let mut record = self.load_owned(ctx, record_id)?;
        record.replace_fields(fields)?;
        self.commit(record)?;

        tracing::info!(%record_id, "record updated");
        Ok(())
    }

    /// Append tags, failing rather than truncating past the cap. Controller only.
    pub fn extend_tags<T: AsRef<str>>(
        &mut self,
        ctx: &TxContext,
        record_id: RecordId,
        new_tags: &[T],
    ) -> Result<()> {
        let mut record = self.load_owned(ctx, record_id)?;
        record.append_tags(new_tags)?;
        let tag_count = record.tags().len();
        self.commit(record)?;

        tracing::info!(%record_id, tag_count, "tags extended");
        Ok(())
    }

    /// Mark a record archived by appending the archive tag. Controller only.
    ///
    /// Archived records stay fully mutable.
    pub fn archive(&mut self, ctx: &TxContext, record_id: RecordId) -> Result<()> {
        let mut record = self.load_owned(ctx, record_id)?;
        record.append_tags(&[ARCHIVED_TAG])?;
        self.commit(record)?;

        tracing::info!(%record_id, "record archived");
        Ok(())
    }

    /// Hand control of a record to another principal. Controller only.
    ///
    /// Grants are left alone: the previous controller keeps whatever grant
    /// they hold as a viewer, and nothing more.
    pub fn reassign_controller(
        &mut self,
        ctx: &TxContext,
        record_id: RecordId,
        new_controller: Principal,
    ) -> Result<()> {
        let mut record = self.load_owned(ctx, record_id)?;
        let previous = record.controller;
        record.controller = new_controller;
        self.commit(record)?;

        tracing::info!(%record_id, %previous, controller = %new_controller, "controller reassigned");
        Ok(())
    }

    /// Delete a record. Controller only.
    ///
    /// Grants on the record are not removed; they stay inert until
    /// [`Registry::sweep_orphaned_grants`] runs.
    pub fn terminate(&mut self, ctx: &TxContext, record_id: RecordId) -> Result<()> {
        self.load_owned(ctx, record_id)?;
        self.store
            .remove_record(&record_id)
            .ok_or(RegistryError::RecordNotFound(record_id))?;

        tracing::info!(%record_id, "record terminated");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Derived metrics for a record the caller may read.
    pub fn inspect(&self, ctx: &TxContext, record_id: RecordId) -> Result<RecordMetrics> {
        let record = self.load(record_id)?;
        let authority = self.evaluator().require_read(&record, &ctx.sender)?;

        tracing::debug!(%record_id, ?authority, "record inspected");
        Ok(record.metrics(ctx.block_height))
    }

    /// An owned copy of a record the caller may read.
    pub fn record(&self, ctx: &TxContext, record_id: RecordId) -> Result<Record> {
        let record = self.load(record_id)?;
        self.evaluator().require_read(&record, &ctx.sender)?;
        Ok(record)
    }

    /// Whether `caller` may read `record_id`. False for missing records.
    pub fn can_read(&self, record_id: RecordId, caller: &Principal) -> bool {
        self.store
            .get_record(&record_id)
            .is_some_and(|record| self.evaluator().can_read(&record, caller))
    }

    /// Ids of the records the caller controls.
    pub fn records_controlled_by(&self, ctx: &TxContext) -> Vec<RecordId> {
        self.store.records_controlled_by(&ctx.sender)
    }

    /// Compare `claimed_controller` against the record's controller.
    ///
    /// Plain identity equality; no signature is checked. A mismatch is
    /// reported in the result, not as an error.
    pub fn authenticate(
        &self,
        ctx: &TxContext,
        record_id: RecordId,
        claimed_controller: &Principal,
    ) -> Result<AuthenticationReport> {
        let record = self.load(record_id)?;
        self.evaluator().require_read(&record, &ctx.sender)?;

        let verified = record.is_controlled_by(claimed_controller);
        tracing::debug!(%record_id, verified, "controller claim checked");

        Ok(AuthenticationReport {
            success: true,
            timestamp: ctx.block_height,
            record_age: record.age_at(ctx.block_height),
            verified,
        })
    }

    /// Check that the caller may secure the record: controller or administrator.
    ///
    /// Nothing is recorded; the returned authority says which check passed.
    pub fn secure(&self, ctx: &TxContext, record_id: RecordId) -> Result<Authority> {
        let record = self.load(record_id)?;
        let authority = self.evaluator().require_secure(&record, &ctx.sender)?;

        tracing::debug!(%record_id, ?authority, "secure check passed");
        Ok(authority)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant `viewer` read access. Controller only; idempotent.
    pub fn authorize_viewer(
        &mut self,
        ctx: &TxContext,
        record_id: RecordId,
        viewer: Principal,
    ) -> Result<GrantOutcome> {
        self.load_owned(ctx, record_id)?;
        let outcome = self
            .permissions
            .grant(record_id, viewer, ctx.block_height);

        tracing::info!(%record_id, %viewer, ?outcome, "viewer authorized");
        Ok(outcome)
    }

    /// Remove `viewer`'s read access. Controller only, and not on themselves.
    pub fn revoke_viewer(
        &mut self,
        ctx: &TxContext,
        record_id: RecordId,
        viewer: &Principal,
    ) -> Result<RevokeOutcome> {
        self.load_owned(ctx, record_id)?;
        if viewer == &ctx.sender {
            tracing::warn!(%record_id, caller = %ctx.sender, "self-revocation refused");
            return Err(RegistryError::AdminAccessDenied(ctx.sender));
        }

        let outcome = self.permissions.revoke(record_id, viewer);

        tracing::info!(%record_id, %viewer, ?outcome, "viewer revoked");
        Ok(outcome)
    }
}
