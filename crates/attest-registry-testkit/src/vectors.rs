//! Field boundary vectors.
//!
//! Each vector registers one record and states the error code registration
//! must produce, or `None` if it must succeed. Lengths sit on both sides of
//! every bound.

use attest_registry_core::{ErrorCode, RecordFields};

/// A boundary test vector.
#[derive(Debug, Clone)]
pub struct BoundaryVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub label_len: usize,
    pub weight: u64,
    pub summary_len: usize,
    /// Lengths of each tag.
    pub tag_lens: Vec<usize>,
    /// Expected failure, if any.
    pub expected: Option<ErrorCode>,
}

impl BoundaryVector {
    /// Build the record fields this vector describes.
    pub fn fields(&self) -> RecordFields {
        RecordFields::new(
            "l".repeat(self.label_len),
            self.weight,
            "s".repeat(self.summary_len),
            self.tag_lens.iter().map(|&len| "t".repeat(len)),
        )
    }
}

fn vector(
    name: &'static str,
    label_len: usize,
    weight: u64,
    summary_len: usize,
    tag_lens: &[usize],
    expected: Option<ErrorCode>,
) -> BoundaryVector {
    BoundaryVector {
        name,
        label_len,
        weight,
        summary_len,
        tag_lens: tag_lens.to_vec(),
        expected,
    }
}

/// Get all boundary vectors.
pub fn all_vectors() -> Vec<BoundaryVector> {
    use ErrorCode::*;

    vec![
        vector("minimal record", 1, 1, 1, &[1], None),
        vector("maximal record", 64, 999_999_999, 128, &[32; 10], None),
        vector("empty label", 0, 1, 1, &[1], Some(InvalidIdentifier)),
        vector("label too long", 65, 1, 1, &[1], Some(InvalidIdentifier)),
        vector("zero weight", 1, 0, 1, &[1], Some(InvalidDataFormat)),
        vector("weight at limit", 1, 1_000_000_000, 1, &[1], Some(InvalidDataFormat)),
        vector("empty summary", 1, 1, 0, &[1], Some(InvalidIdentifier)),
        vector("summary too long", 1, 1, 129, &[1], Some(InvalidIdentifier)),
        vector("no tags", 1, 1, 1, &[], Some(TagValidationFailed)),
        vector("eleven tags", 1, 1, 1, &[1; 11], Some(TagValidationFailed)),
        vector("empty tag", 1, 1, 1, &[3, 0], Some(TagValidationFailed)),
        vector("tag too long", 1, 1, 1, &[33], Some(TagValidationFailed)),
        // Label is checked before weight.
        vector("label and weight both bad", 0, 0, 1, &[1], Some(InvalidIdentifier)),
        vector("weight and tags both bad", 1, 0, 1, &[], Some(InvalidDataFormat)),
    ]
}
