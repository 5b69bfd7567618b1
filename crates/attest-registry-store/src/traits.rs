//! Store trait: the abstract interface for record storage.
//!
//! The registry is storage-agnostic. The store owns the records and the
//! identifier counter; permission grants live elsewhere.

use attest_registry_core::{Principal, Record, RecordId};

use crate::error::Result;

/// Result of inserting a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertResult {
    /// Record was inserted.
    Inserted,
    /// A record with this id already exists. Nothing was written.
    AlreadyExists,
}

/// Record storage.
///
/// Reads hand out owned copies so callers can stage a change on a copy and
/// commit it with [`Store::replace_record`] only once every check passed.
///
/// # Design Notes
///
/// - **No cascade**: removing a record touches nothing but the record.
/// - **Counter is separate**: removing a record never lowers
///   [`Store::last_record_id`], so ids are not reused.
pub trait Store {
    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a record by id.
    fn get_record(&self, id: &RecordId) -> Option<Record>;

    /// Check if a record exists.
    fn has_record(&self, id: &RecordId) -> bool;

    /// Insert a new record.
    fn insert_record(&mut self, record: Record) -> InsertResult;

    /// Overwrite an existing record.
    ///
    /// Fails with `NotFound` if no record with this id exists.
    fn replace_record(&mut self, record: Record) -> Result<()>;

    /// Remove a record, returning it if it existed.
    fn remove_record(&mut self, id: &RecordId) -> Option<Record>;

    /// Number of live records.
    fn record_count(&self) -> usize;

    /// All live record ids, ascending.
    fn record_ids(&self) -> Vec<RecordId>;

    /// Ids of records controlled by `controller`, ascending.
    fn records_controlled_by(&self, controller: &Principal) -> Vec<RecordId>;

    // ─────────────────────────────────────────────────────────────────────────
    // Counter Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The most recently issued record id (zero before the first).
    fn last_record_id(&self) -> RecordId;

    /// Advance the counter.
    fn set_last_record_id(&mut self, id: RecordId);
}

/// Extension trait for common store patterns.
pub trait StoreExt: Store {
    /// The id the next registration will receive, or `None` once the id
    /// space is exhausted. Does not advance the counter.
    fn peek_next_record_id(&self) -> Option<RecordId> {
        self.last_record_id().checked_next()
    }

    /// Insert a freshly numbered record and advance the counter to its id.
    ///
    /// The counter moves only if the insert happened.
    fn insert_and_advance(&mut self, record: Record) -> InsertResult {
        let id = record.record_id();
        let result = self.insert_record(record);
        if result == InsertResult::Inserted && id > self.last_record_id() {
            self.set_last_record_id(id);
        }
        result
    }

    /// All live records in id order.
    fn records(&self) -> Vec<Record> {
        self.record_ids()
            .iter()
            .filter_map(|id| self.get_record(id))
            .collect()
    }
}

impl<S: Store + ?Sized> StoreExt for S {}
