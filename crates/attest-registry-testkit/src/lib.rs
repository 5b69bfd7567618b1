//! # Attest Registry Testkit
//!
//! Testing utilities for the Attest Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Boundary vectors**: Field values on both sides of every limit, with the
//!   error code registration must return
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Boundary Vectors
//!
//! ```rust
//! use attest_registry_testkit::fixtures::TestFixture;
//! use attest_registry_testkit::vectors::all_vectors;
//!
//! let mut fixture = TestFixture::new();
//! let ctx = fixture.ctx(fixture.alice, 1);
//! for vector in all_vectors() {
//!     let result = fixture.registry.register(&ctx, vector.fields());
//!     assert_eq!(result.err().map(|e| e.code()), vector.expected);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use attest_registry_testkit::generators::valid_fields;
//!
//! proptest! {
//!     #[test]
//!     fn registration_accepts_valid_fields(fields in valid_fields()) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use attest_registry_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::new();
//! let alice = fixture.alice;
//! let id = fixture.register_sample(alice, 100);
//! assert!(fixture.registry.can_read(id, &alice));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{init_tracing, sample_fields, TestFixture};
pub use generators::{valid_fields, BrokenField, FieldsParams};
pub use vectors::{all_vectors, BoundaryVector};
