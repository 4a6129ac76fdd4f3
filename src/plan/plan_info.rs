//! Static summary of what a predicate touches.

use crate::schema::FieldId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a field can be resolved by the predicate forms that reference it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    /// Every form touching the field can be answered by a single-field index
    Indexable,
    /// At least one form touching the field needs raw values
    ScanOnly,
}

impl Eligibility {
    /// Combine two classifications of the same field; scan-only wins
    pub fn and(self, other: Eligibility) -> Eligibility {
        match (self, other) {
            (Eligibility::Indexable, Eligibility::Indexable) => Eligibility::Indexable,
            _ => Eligibility::ScanOnly,
        }
    }
}

/// Fields referenced by a plan and how each of them may be evaluated.
///
/// Built by a single traversal, then shared read-only (usually behind an
/// `Arc`) for the rest of the plan's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPlanInfo {
    involved_fields: BTreeMap<FieldId, Eligibility>,
    cross_field_compare: bool,
}

impl ExtractedPlanInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `field_id` is referenced by a form of the given eligibility.
    /// A field once marked scan-only stays scan-only.
    pub fn add_involved_field(&mut self, field_id: FieldId, eligibility: Eligibility) {
        self.involved_fields
            .entry(field_id)
            .and_modify(|current| *current = current.and(eligibility))
            .or_insert(eligibility);
    }

    pub(crate) fn mark_cross_field_compare(&mut self) {
        self.cross_field_compare = true;
    }

    /// Union another summary into this one
    pub fn merge(&mut self, other: &ExtractedPlanInfo) {
        for (&field_id, &eligibility) in &other.involved_fields {
            self.add_involved_field(field_id, eligibility);
        }
        self.cross_field_compare |= other.cross_field_compare;
    }

    /// Referenced field ids in ascending order
    pub fn involved_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.involved_fields.keys().copied()
    }

    pub fn is_involved(&self, field_id: FieldId) -> bool {
        self.involved_fields.contains_key(&field_id)
    }

    pub fn eligibility(&self, field_id: FieldId) -> Option<Eligibility> {
        self.involved_fields.get(&field_id).copied()
    }

    pub fn is_index_eligible(&self, field_id: FieldId) -> bool {
        self.eligibility(field_id) == Some(Eligibility::Indexable)
    }

    pub fn index_eligible_fields(&self) -> Vec<FieldId> {
        self.fields_with(Eligibility::Indexable)
    }

    pub fn scan_only_fields(&self) -> Vec<FieldId> {
        self.fields_with(Eligibility::ScanOnly)
    }

    fn fields_with(&self, eligibility: Eligibility) -> Vec<FieldId> {
        self.involved_fields
            .iter()
            .filter(|(_, e)| **e == eligibility)
            .map(|(field_id, _)| *field_id)
            .collect()
    }

    /// True iff the plan contains at least one field-to-field comparison
    pub fn has_cross_field_compare(&self) -> bool {
        self.cross_field_compare
    }

    /// Whether single-field index lookups alone can resolve the plan
    pub fn is_index_servable(&self) -> bool {
        !self.is_empty()
            && !self.cross_field_compare
            && self
                .involved_fields
                .values()
                .all(|e| *e == Eligibility::Indexable)
    }

    pub fn len(&self) -> usize {
        self.involved_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.involved_fields.is_empty()
    }
}
