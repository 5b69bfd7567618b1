//! Records: the entities held by the registry.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{BlockHeight, Principal, RecordId};
use crate::validation::{validate_append, validate_fields};

/// Tag appended by the archive operation.
pub const ARCHIVED_TAG: &str = "ARCHIVED-STATUS";

/// The caller-supplied, mutable fields of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Short label, 1-64 characters.
    pub label: String,
    /// Weight, 1 <= weight < 1_000_000_000.
    pub weight: u64,
    /// Summary, 1-128 characters.
    pub summary: String,
    /// Tags in insertion order, 1-10 entries of 1-32 characters.
    pub tags: Vec<String>,
}

impl RecordFields {
    /// Bundle the four caller-supplied fields.
    pub fn new<T: Into<String>>(
        label: impl Into<String>,
        weight: u64,
        summary: impl Into<String>,
        tags: impl IntoIterator<Item = T>,
    ) -> Self {
        Self {
            label: label.into(),
            weight,
            summary: summary.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Check every field against its bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(self)
    }
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, unique for the lifetime of the registry.
    record_id: RecordId,

    /// The principal with write authority over this record.
    pub controller: Principal,

    /// Height at which the record was registered.
    created_at: BlockHeight,

    /// Mutable content.
    pub fields: RecordFields,
}

impl Record {
    /// Create a record. Fields are expected to be validated already.
    pub fn new(
        record_id: RecordId,
        controller: Principal,
        created_at: BlockHeight,
        fields: RecordFields,
    ) -> Self {
        Self {
            record_id,
            controller,
            created_at,
            fields,
        }
    }

    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Height at which the record was registered. Never changes.
    pub fn created_at(&self) -> BlockHeight {
        self.created_at
    }

    pub fn label(&self) -> &str {
        &self.fields.label
    }

    pub fn weight(&self) -> u64 {
        self.fields.weight
    }

    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    pub fn tags(&self) -> &[String] {
        &self.fields.tags
    }

    /// Whether `principal` controls this record.
    pub fn is_controlled_by(&self, principal: &Principal) -> bool {
        &self.controller == principal
    }

    /// Whether the archive marker has been appended.
    pub fn is_archived(&self) -> bool {
        self.fields.tags.iter().any(|t| t == ARCHIVED_TAG)
    }

    /// Blocks elapsed since registration.
    pub fn age_at(&self, now: BlockHeight) -> u64 {
        now.blocks_since(self.created_at)
    }

    /// Derived metrics for read-only inspection.
    pub fn metrics(&self, now: BlockHeight) -> RecordMetrics {
        RecordMetrics {
            age_in_blocks: self.age_at(now),
            weight: self.fields.weight,
            tag_count: self.fields.tags.len(),
        }
    }

    /// Replace the mutable fields after validating them.
    ///
    /// Controller and creation height are untouched. On error the record is
    /// left as it was.
    pub fn replace_fields(&mut self, fields: RecordFields) -> Result<(), ValidationError> {
        fields.validate()?;
        self.fields = fields;
        Ok(())
    }

    /// Append tags, refusing (not truncating) if the result would exceed the cap.
    pub fn append_tags<S: AsRef<str>>(&mut self, tags: &[S]) -> Result<(), ValidationError> {
        validate_append(self.fields.tags.len(), tags)?;
        self.fields
            .tags
            .extend(tags.iter().map(|t| t.as_ref().to_string()));
        Ok(())
    }

    /// Check the whole record against the field bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fields.validate()
    }
}

/// Read-only view returned by inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetrics {
    pub age_in_blocks: u64,
    pub weight: u64,
    pub tag_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new(
            RecordId::new(1),
            Principal::derive("alice"),
            BlockHeight(5),
            RecordFields::new("sensor-1", 500, "telemetry unit", ["temp", "humidity"]),
        )
    }

    #[test]
    fn test_metrics() {
        let record = sample();
        let m = record.metrics(BlockHeight(12));
        assert_eq!(m.age_in_blocks, 7);
        assert_eq!(m.weight, 500);
        assert_eq!(m.tag_count, 2);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut record = sample();
        record.append_tags(&["pressure"]).unwrap();
        assert_eq!(record.tags(), ["temp", "humidity", "pressure"]);
    }

    #[test]
    fn test_append_rejected_leaves_tags_untouched() {
        let mut record = sample();
        let eight: Vec<String> = (0..8).map(|i| format!("t{i}")).collect();
        record.append_tags(&eight).unwrap();
        assert_eq!(record.tags().len(), 10);

        let err = record.append_tags(&["one-more"]).unwrap_err();
        assert!(matches!(err, ValidationError::TagCapacity { existing: 10, added: 1 }));
        assert_eq!(record.tags().len(), 10);
    }

    #[test]
    fn test_replace_fields_keeps_identity() {
        let mut record = sample();
        let fields = RecordFields::new("sensor-2", 42, "rebuilt", ["a"]);
        record.replace_fields(fields.clone()).unwrap();
        assert_eq!(record.fields, fields);
        assert_eq!(record.controller, Principal::derive("alice"));
        assert_eq!(record.record_id(), RecordId::new(1));
        assert_eq!(record.created_at(), BlockHeight(5));
    }

    #[test]
    fn test_identity_survives_serde() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.record_id(), record.record_id());
        assert_eq!(back.created_at(), record.created_at());
        assert_eq!(back, record);
    }

    #[test]
    fn test_replace_fields_rejects_invalid() {
        let mut record = sample();
        let before = record.clone();
        let err = record
            .replace_fields(RecordFields::new("ok", 0, "ok", ["a"]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::WeightOutOfRange(0)));
        assert_eq!(record, before);
    }

    #[test]
    fn test_archive_marker() {
        let mut record = sample();
        assert!(!record.is_archived());
        record.append_tags(&[ARCHIVED_TAG]).unwrap();
        assert!(record.is_archived());
    }
}
