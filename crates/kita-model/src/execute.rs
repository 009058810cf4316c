//! Commit request and result of the import.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::ParentSlot;
use crate::preview::{ChildRecord, ParentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecuteAction {
    /// Create a new child record.
    Create,
    /// Attach parents and field updates to an existing child.
    Merge,
}

/// One row of the commit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRow {
    pub index: usize,
    pub action: ExecuteAction,
    pub child: ChildRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent1: Option<ParentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent2: Option<ParentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_child_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_parents: Option<bool>,
    /// Field name to imported value, only for conflicts resolved as "new".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_updates: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentAction {
    Create,
    Link,
}

/// What to do with one parent sub-record of a submitted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDecision {
    pub row_index: usize,
    pub parent_slot: ParentSlot,
    pub action: ParentAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_parent_id: Option<String>,
}

impl ParentDecision {
    pub fn create(row_index: usize, parent_slot: ParentSlot) -> Self {
        Self {
            row_index,
            parent_slot,
            action: ParentAction::Create,
            existing_parent_id: None,
        }
    }

    pub fn link(row_index: usize, parent_slot: ParentSlot, parent_id: impl Into<String>) -> Self {
        Self {
            row_index,
            parent_slot,
            action: ParentAction::Link,
            existing_parent_id: Some(parent_id.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub rows: Vec<ExecuteRow>,
    pub parent_decisions: Vec<ParentDecision>,
}

impl ExecuteRequest {
    pub fn count(&self, action: ExecuteAction) -> usize {
        self.rows.iter().filter(|row| row.action == action).count()
    }
}

/// A business error for one row, reported by the commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub row_index: usize,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResult {
    #[serde(default)]
    pub children_created: usize,
    #[serde(default)]
    pub children_updated: usize,
    #[serde(default)]
    pub parents_created: usize,
    #[serde(default)]
    pub parents_linked: usize,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

impl ExecuteResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
