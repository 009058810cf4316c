use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// Assignment of target fields to source column indices.
///
/// A field absent from the map is unmapped. On the wire this is a JSON object
/// keyed by the field's camelCase name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(BTreeMap<FieldKey, usize>);

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldKey) -> Option<usize> {
        self.0.get(&field).copied()
    }

    /// Assigns `column` to `field`, returning the previous column.
    pub fn set(&mut self, field: FieldKey, column: usize) -> Option<usize> {
        self.0.insert(field, column)
    }

    pub fn remove(&mut self, field: FieldKey) -> Option<usize> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: FieldKey) -> bool {
        self.0.contains_key(&field)
    }

    /// The field a column is currently assigned to.
    pub fn field_for_column(&self, column: usize) -> Option<FieldKey> {
        self.0
            .iter()
            .find(|(_, col)| **col == column)
            .map(|(field, _)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, usize)> + '_ {
        self.0.iter().map(|(field, col)| (*field, *col))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Required-for-preview fields that are not mapped.
    pub fn missing_required(&self) -> Vec<FieldKey> {
        FieldKey::REQUIRED_FOR_PREVIEW
            .iter()
            .copied()
            .filter(|field| !self.contains(*field))
            .collect()
    }
}

impl FromIterator<(FieldKey, usize)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (FieldKey, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
