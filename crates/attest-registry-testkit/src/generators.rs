//! Proptest generators for property-based testing.

use proptest::prelude::*;

use attest_registry_core::{
    Principal, RecordFields, MAX_LABEL_LEN, MAX_SUMMARY_LEN, MAX_TAGS, MAX_TAG_LEN, WEIGHT_LIMIT,
};

/// Generate one of `count` fixed principals, so operations collide often.
pub fn small_principal(count: u8) -> impl Strategy<Value = Principal> {
    (0..count).prop_map(|i| Principal::derive(&format!("party-{i}")))
}

/// A string of exactly `len` characters, mixing ASCII and multibyte.
fn text_of_len(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('a'), Just('z'), Just('é'), Just('日')], len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A label within bounds.
pub fn valid_label() -> impl Strategy<Value = String> {
    (1..=MAX_LABEL_LEN).prop_flat_map(text_of_len)
}

/// A label that is empty or too long.
pub fn invalid_label() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), (MAX_LABEL_LEN + 1..=MAX_LABEL_LEN * 2).prop_flat_map(text_of_len)]
}

pub fn valid_weight() -> impl Strategy<Value = u64> {
    1..WEIGHT_LIMIT
}

pub fn invalid_weight() -> impl Strategy<Value = u64> {
    prop_oneof![Just(0u64), WEIGHT_LIMIT..=u64::MAX]
}

pub fn valid_summary() -> impl Strategy<Value = String> {
    (1..=MAX_SUMMARY_LEN).prop_flat_map(text_of_len)
}

pub fn invalid_summary() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), (MAX_SUMMARY_LEN + 1..=MAX_SUMMARY_LEN * 2).prop_flat_map(text_of_len)]
}

pub fn valid_tag() -> impl Strategy<Value = String> {
    (1..=MAX_TAG_LEN).prop_flat_map(text_of_len)
}

/// A tag list of `count` valid tags, for any `count` in `range`.
pub fn tags(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(valid_tag(), range)
}

pub fn valid_tags() -> impl Strategy<Value = Vec<String>> {
    tags(1..=MAX_TAGS)
}

/// A tag list that fails validation: empty, too long, or holding a bad tag.
pub fn invalid_tags() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        Just(Vec::new()),
        tags(MAX_TAGS + 1..=MAX_TAGS + 5),
        (valid_tags(), any::<prop::sample::Index>(), MAX_TAG_LEN + 1..=MAX_TAG_LEN * 2).prop_flat_map(
            |(tags, index, len)| {
                text_of_len(len).prop_map(move |long| {
                    let mut tags = tags.clone();
                    let at = index.index(tags.len());
                    tags[at] = long;
                    tags
                })
            }
        ),
    ]
}

/// Fields that pass validation.
pub fn valid_fields() -> impl Strategy<Value = RecordFields> {
    (valid_label(), valid_weight(), valid_summary(), valid_tags())
        .prop_map(|(label, weight, summary, tags)| RecordFields::new(label, weight, summary, tags))
}

/// Which field an invalid [`FieldsParams`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokenField {
    Label,
    Weight,
    Summary,
    Tags,
}

/// Parameters for a record with exactly one invalid field.
#[derive(Debug, Clone)]
pub struct FieldsParams {
    pub broken: BrokenField,
    pub fields: RecordFields,
}

impl Arbitrary for FieldsParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let label = (invalid_label(), valid_weight(), valid_summary(), valid_tags())
            .prop_map(|(l, w, s, t)| (BrokenField::Label, l, w, s, t));
        let weight = (valid_label(), invalid_weight(), valid_summary(), valid_tags())
            .prop_map(|(l, w, s, t)| (BrokenField::Weight, l, w, s, t));
        let summary = (valid_label(), valid_weight(), invalid_summary(), valid_tags())
            .prop_map(|(l, w, s, t)| (BrokenField::Summary, l, w, s, t));
        let tags = (valid_label(), valid_weight(), valid_summary(), invalid_tags())
            .prop_map(|(l, w, s, t)| (BrokenField::Tags, l, w, s, t));

        prop_oneof![label, weight, summary, tags]
            .prop_map(|(broken, label, weight, summary, tags)| FieldsParams {
                broken,
                fields: RecordFields::new(label, weight, summary, tags),
            })
            .boxed()
    }
}
