//! # Attest Registry Core
//!
//! Pure primitives for the Attest Registry: identities, records, field
//! validation and the error taxonomy.
//!
//! This crate contains no storage and no permission logic. It is pure
//! computation over record data.
//!
//! ## Key Types
//!
//! - [`Record`] - A stored entity owned by a single controller
//! - [`RecordFields`] - The caller-supplied, mutable part of a record
//! - [`RecordId`] - Monotonically assigned identifier
//! - [`Principal`] - A 32-byte identity, compared by equality
//! - [`TxContext`] - Sender and block height for one operation
//! - [`RegistryError`] - Operation failures, each with a numeric [`ErrorCode`]
//!
//! ## Canonicalization
//!
//! Records are encoded using deterministic CBOR for state digests. See the
//! [`canonical`] module.

pub mod canonical;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use canonical::{canonical_grant_bytes, canonical_record_bytes, StateDigest, StateHasher};
pub use error::{ErrorCode, RegistryError, Result, ValidationError};
pub use record::{Record, RecordFields, RecordMetrics, ARCHIVED_TAG};
pub use types::{BlockHeight, Principal, RecordId, TxContext};
pub use validation::{
    is_valid_tag, validate_append, validate_fields, validate_label, validate_summary,
    validate_tags, validate_weight, MAX_LABEL_LEN, MAX_SUMMARY_LEN, MAX_TAGS, MAX_TAG_LEN,
    WEIGHT_LIMIT,
};
