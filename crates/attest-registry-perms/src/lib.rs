//! # Attest Registry Permissions
//!
//! Read grants and authority evaluation.
//!
//! ## Overview
//!
//! Every record has one controller with write authority. Other principals
//! read a record only through an explicit grant, or by being the
//! administrator. This crate owns the grant table and the checks that gate
//! each registry operation.
//!
//! ## Key Concepts
//!
//! - **Grant**: An entry authorizing one viewer to read one record
//! - **Authority**: Which of controller / viewer / administrator admitted a caller
//! - **Orphan**: A grant whose record has been terminated; inert until swept
//!
//! ## Usage
//!
//! ```rust
//! use attest_registry_core::{BlockHeight, Principal, Record, RecordFields, RecordId};
//! use attest_registry_perms::{Authority, PermissionTable};
//!
//! let alice = Principal::derive("alice");
//! let bob = Principal::derive("bob");
//! let admin = Principal::derive("admin");
//! let record = Record::new(
//!     RecordId::new(1),
//!     alice,
//!     BlockHeight(0),
//!     RecordFields::new("sensor-1", 500, "telemetry unit", ["temp"]),
//! );
//!
//! let mut table = PermissionTable::new();
//! table.grant(record.record_id(), bob, BlockHeight(3));
//!
//! let eval = table.evaluator(&admin);
//! assert_eq!(eval.read_authority(&record, &bob), Some(Authority::Viewer));
//! ```

pub mod authority;
pub mod grant;
pub mod state;

pub use authority::{require_controller, Authority, Evaluator};
pub use grant::{GrantKey, GrantOutcome, PermissionGrant, RevokeOutcome};
pub use state::PermissionTable;
