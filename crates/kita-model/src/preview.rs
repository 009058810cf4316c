//! Server-side classification of import rows.

use serde::{Deserialize, Serialize};

use crate::field::{FieldKey, ParentSlot};
use crate::mapping::FieldMapping;
use crate::parsed::Separator;

/// Candidate child record built from one source row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRecord {
    #[serde(default)]
    pub member_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub entry_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Weekly care hours as imported (may still be a daily figure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_hours: Option<f64>,
}

impl ChildRecord {
    /// Required row fields that are blank.
    pub fn missing_required(&self) -> Vec<FieldKey> {
        FieldKey::REQUIRED_FOR_ROW
            .iter()
            .copied()
            .filter(|field| self.text(*field).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    pub fn has_required_fields(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Text value of a child field; `None` for parent fields, unset optionals
    /// and care hours.
    pub fn text(&self, field: FieldKey) -> Option<&str> {
        match field {
            FieldKey::MemberNumber => Some(&self.member_number),
            FieldKey::FirstName => Some(&self.first_name),
            FieldKey::LastName => Some(&self.last_name),
            FieldKey::BirthDate => Some(&self.birth_date),
            FieldKey::EntryDate => Some(&self.entry_date),
            FieldKey::ExitDate => self.exit_date.as_deref(),
            FieldKey::Street => self.street.as_deref(),
            FieldKey::HouseNumber => self.house_number.as_deref(),
            FieldKey::PostalCode => self.postal_code.as_deref(),
            FieldKey::City => self.city.as_deref(),
            _ => None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// A stored parent that an imported parent could be linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingParent {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Candidate parent record built from one source row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRecord {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Stored parents the server considers the same person.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub existing_matches: Vec<ExistingParent>,
    /// The parent is already linked to the existing child.
    #[serde(default)]
    pub already_linked: bool,
}

impl ParentRecord {
    pub fn has_name(&self) -> bool {
        !self.first_name.trim().is_empty() || !self.last_name.trim().is_empty()
    }

    pub fn find_match(&self, parent_id: &str) -> Option<&ExistingParent> {
        self.existing_matches.iter().find(|p| p.id == parent_id)
    }
}

/// Snapshot of the stored child a duplicate row collides with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingChild {
    pub id: String,
    #[serde(flatten)]
    pub record: ChildRecord,
}

/// A field whose imported value differs from the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConflict {
    pub field: String,
    #[serde(default)]
    pub field_label: String,
    #[serde(default)]
    pub existing_value: String,
    #[serde(default)]
    pub new_value: String,
}

/// One classified row of the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRow {
    /// Stable row identity for the whole wizard.
    pub index: usize,
    pub child: ChildRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent1: Option<ParentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent2: Option<ParentRecord>,
    pub is_valid: bool,
    pub is_duplicate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_child_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_child: Option<ExistingChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_conflicts: Option<Vec<FieldConflict>>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl PreviewRow {
    pub fn parent(&self, slot: ParentSlot) -> Option<&ParentRecord> {
        match slot {
            ParentSlot::First => self.parent1.as_ref(),
            ParentSlot::Second => self.parent2.as_ref(),
        }
    }

    pub fn conflicts(&self) -> &[FieldConflict] {
        self.field_conflicts.as_deref().unwrap_or(&[])
    }

    pub fn conflict(&self, field: &str) -> Option<&FieldConflict> {
        self.conflicts().iter().find(|c| c.field == field)
    }
}

/// Body of the preview call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Base64 of the raw uploaded bytes.
    pub file_content: String,
    pub separator: Separator,
    pub mapping: FieldMapping,
    pub skip_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub rows: Vec<PreviewRow>,
    pub valid_count: usize,
    pub error_count: usize,
}
