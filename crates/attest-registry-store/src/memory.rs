//! In-memory implementation of the Store trait.
//!
//! The host is expected to persist state through snapshots; the store
//! itself keeps everything in memory.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use attest_registry_core::{Principal, Record, RecordId};

use crate::error::{Result, StoreError};
use crate::snapshot::StoreSnapshot;
use crate::traits::{InsertResult, Store};

/// In-memory store implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Records indexed by id.
    records: BTreeMap<RecordId, Record>,

    /// Index: controller -> ids of the records they control.
    by_controller: HashMap<Principal, BTreeSet<RecordId>>,

    /// Most recently issued id.
    last_record_id: RecordId,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose counter starts at `last_record_id`.
    pub fn with_last_record_id(last_record_id: RecordId) -> Self {
        Self {
            last_record_id,
            ..Self::default()
        }
    }

    /// Capture the full store state.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            last_record_id: self.last_record_id,
            records: self.records.values().cloned().collect(),
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// Rejects snapshots holding invalid records, duplicate ids, or ids the
    /// counter has not reached yet.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self> {
        snapshot.check()?;

        let mut store = Self::with_last_record_id(snapshot.last_record_id);
        for record in snapshot.records {
            let id = record.record_id();
            if store.insert_record(record) == InsertResult::AlreadyExists {
                return Err(StoreError::Duplicate(id));
            }
        }

        tracing::debug!(
            records = store.records.len(),
            last_record_id = %store.last_record_id,
            "restored store from snapshot"
        );
        Ok(store)
    }

    fn index(&mut self, record: &Record) {
        self.by_controller
            .entry(record.controller)
            .or_default()
            .insert(record.record_id());
    }

    fn unindex(&mut self, record: &Record) {
        if let Some(ids) = self.by_controller.get_mut(&record.controller) {
            ids.remove(&record.record_id());
            if ids.is_empty() {
                self.by_controller.remove(&record.controller);
            }
        }
    }
}

impl Store for MemoryStore {
    fn get_record(&self, id: &RecordId) -> Option<Record> {
        self.records.get(id).cloned()
    }

    fn has_record(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    fn insert_record(&mut self, record: Record) -> InsertResult {
        if self.records.contains_key(&record.record_id()) {
            return InsertResult::AlreadyExists;
        }

        self.index(&record);
        self.records.insert(record.record_id(), record);
        InsertResult::Inserted
    }

    fn replace_record(&mut self, record: Record) -> Result<()> {
        let previous = self
            .records
            .get(&record.record_id())
            .cloned()
            .ok_or(StoreError::NotFound(record.record_id()))?;

        if previous.controller != record.controller {
            self.unindex(&previous);
            self.index(&record);
        }

        self.records.insert(record.record_id(), record);
        Ok(())
    }

    fn remove_record(&mut self, id: &RecordId) -> Option<Record> {
        let record = self.records.remove(id)?;
        self.unindex(&record);
        Some(record)
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn record_ids(&self) -> Vec<RecordId> {
        self.records.keys().copied().collect()
    }

    fn records_controlled_by(&self, controller: &Principal) -> Vec<RecordId> {
        self.by_controller
            .get(controller)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn last_record_id(&self) -> RecordId {
        self.last_record_id
    }

    fn set_last_record_id(&mut self, id: RecordId) {
        self.last_record_id = id;
    }
}
