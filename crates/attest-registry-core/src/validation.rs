//! Field validation: length and range bounds for record fields.
//!
//! Lengths are counted in characters, not bytes.

use crate::error::ValidationError;
use crate::record::RecordFields;

/// Maximum label length in characters.
pub const MAX_LABEL_LEN: usize = 64;

/// Exclusive upper bound on record weight.
pub const WEIGHT_LIMIT: u64 = 1_000_000_000;

/// Maximum summary length in characters.
pub const MAX_SUMMARY_LEN: usize = 128;

/// Maximum number of tags on a record.
pub const MAX_TAGS: usize = 10;

/// Maximum tag length in characters.
pub const MAX_TAG_LEN: usize = 32;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validate a record label.
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    let len = char_len(label);
    if len == 0 || len > MAX_LABEL_LEN {
        return Err(ValidationError::LabelLength(len));
    }
    Ok(())
}

/// Validate a record weight.
pub fn validate_weight(weight: u64) -> Result<(), ValidationError> {
    if weight == 0 || weight >= WEIGHT_LIMIT {
        return Err(ValidationError::WeightOutOfRange(weight));
    }
    Ok(())
}

/// Validate a record summary.
pub fn validate_summary(summary: &str) -> Result<(), ValidationError> {
    let len = char_len(summary);
    if len == 0 || len > MAX_SUMMARY_LEN {
        return Err(ValidationError::SummaryLength(len));
    }
    Ok(())
}

/// Check a single tag.
pub fn is_valid_tag(tag: &str) -> bool {
    let len = char_len(tag);
    len > 0 && len <= MAX_TAG_LEN
}

/// Validate a tag sequence: 1 to 10 entries, each 1 to 32 characters.
///
/// Every element is inspected even after a failure; the reported error is
/// the first bad tag in sequence order. A count violation is reported only
/// when all tags are individually well-formed.
pub fn validate_tags<S: AsRef<str>>(tags: &[S]) -> Result<(), ValidationError> {
    let first_bad = tags
        .iter()
        .enumerate()
        .fold(None, |first, (index, tag)| {
            let tag = tag.as_ref();
            match first {
                None if !is_valid_tag(tag) => Some(ValidationError::TagLength {
                    index,
                    len: char_len(tag),
                }),
                other => other,
            }
        });

    if let Some(err) = first_bad {
        return Err(err);
    }

    if tags.is_empty() || tags.len() > MAX_TAGS {
        return Err(ValidationError::TagCount(tags.len()));
    }

    Ok(())
}

/// Validate appending `added` tags onto a record already holding `existing`.
pub fn validate_append<S: AsRef<str>>(existing: usize, added: &[S]) -> Result<(), ValidationError> {
    validate_tags(added)?;

    if existing + added.len() > MAX_TAGS {
        return Err(ValidationError::TagCapacity {
            existing,
            added: added.len(),
        });
    }

    Ok(())
}

/// Validate every field of a record, in order: label, weight, summary, tags.
pub fn validate_fields(fields: &RecordFields) -> Result<(), ValidationError> {
    validate_label(&fields.label)?;
    validate_weight(fields.weight)?;
    validate_summary(&fields.summary)?;
    validate_tags(&fields.tags)?;
    Ok(())
}
