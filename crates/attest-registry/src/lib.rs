//! # Attest Registry
//!
//! The unified API for the Attest Registry: access-controlled verification
//! records for a shared ledger environment.
//!
//! ## Overview
//!
//! A registry holds records and the grants that let principals read them:
//!
//! - **Records**: label, weight, summary and tags, owned by one controller
//! - **Grants**: explicit read authorizations for a (record, viewer) pair
//! - **Administrator**: a single identity fixed at deployment
//!
//! ## Key Concepts
//!
//! - **Controller**: the only principal allowed to mutate a record.
//! - **Ids are never reused**: the counter only moves forward, even past
//!   terminated records.
//! - **Orphaned grants**: grants outlive their record until an
//!   administrator sweeps them.
//! - **All-or-nothing**: a failed operation leaves no trace; see
//!   [`Registry::state_digest`].
//!
//! ## Usage
//!
//! ```rust
//! use attest_registry::{Registry, RegistryConfig};
//! use attest_registry::core::{Principal, RecordFields, TxContext};
//!
//! let admin = Principal::derive("admin");
//! let alice = Principal::derive("alice");
//! let bob = Principal::derive("bob");
//!
//! let mut registry = Registry::new(RegistryConfig::new(admin));
//!
//! let ctx = TxContext::new(alice, 100);
//! let id = registry
//!     .register(&ctx, RecordFields::new("sensor-1", 42, "temp probe", ["iot", "lab"]))
//!     .unwrap();
//!
//! assert!(!registry.can_read(id, &bob));
//! registry.authorize_viewer(&ctx, id, bob).unwrap();
//!
//! let metrics = registry.inspect(&TxContext::new(bob, 150), id).unwrap();
//! assert_eq!(metrics.age_in_blocks, 50);
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `attest_registry::core` - Core types (Record, Principal, errors, validation)
//! - `attest_registry::store` - Storage abstraction and snapshots
//! - `attest_registry::perms` - Grants and authority evaluation

pub mod config;
pub mod registry;
pub mod report;
pub mod snapshot;

// Re-export component crates
pub use attest_registry_core as core;
pub use attest_registry_perms as perms;
pub use attest_registry_store as store;

// Re-export main types for convenience
pub use config::RegistryConfig;
pub use registry::Registry;
pub use report::{AuthenticationReport, Diagnostics};
pub use snapshot::RegistrySnapshot;

// Re-export commonly used types
pub use attest_registry_core::{
    BlockHeight, ErrorCode, Principal, Record, RecordFields, RecordId, RecordMetrics,
    RegistryError, Result, StateDigest, TxContext,
};
pub use attest_registry_perms::{Authority, GrantOutcome, RevokeOutcome};
