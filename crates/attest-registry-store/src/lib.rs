//! # Attest Registry Store
//!
//! Storage abstraction for the Attest Registry. Provides a trait-based
//! interface for record storage with an in-memory implementation.
//!
//! ## Overview
//!
//! The store module abstracts record storage behind the [`Store`] trait,
//! allowing the registry to be storage-agnostic. [`MemoryStore`] is the
//! provided backend; hosts persist it through [`StoreSnapshot`]s.
//!
//! ## Key Types
//!
//! - [`Store`] - The trait for all record storage operations
//! - [`StoreExt`] - Counter-aware helpers built on [`Store`]
//! - [`MemoryStore`] - In-memory storage
//! - [`InsertResult`] - Result of inserting a record
//! - [`StoreSnapshot`] - Serializable store content
//!
//! ## Usage
//!
//! ```rust
//! use attest_registry_core::{BlockHeight, Principal, Record, RecordFields};
//! use attest_registry_store::{InsertResult, MemoryStore, Store, StoreExt};
//!
//! let mut store = MemoryStore::new();
//! let id = store.peek_next_record_id().unwrap();
//! let record = Record::new(
//!     id,
//!     Principal::derive("alice"),
//!     BlockHeight(1),
//!     RecordFields::new("sensor-1", 500, "telemetry unit", ["temp"]),
//! );
//! assert_eq!(store.insert_and_advance(record), InsertResult::Inserted);
//! assert_eq!(store.last_record_id(), id);
//! ```
//!
//! ## Design Notes
//!
//! - **Refused inserts**: Inserting over an existing id returns `AlreadyExists`
//! - **Monotonic counter**: Removing records never lowers the counter
//! - **No cascade**: The store knows nothing about permission grants

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use snapshot::{from_cbor, from_json, to_cbor, to_json, StoreSnapshot};
pub use traits::{InsertResult, Store, StoreExt};
