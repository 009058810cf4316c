//! Target fields of the import mapping.
//!
//! Every column of an uploaded file can be assigned to one of these fields.
//! The set is fixed: the child record plus two optional parent sub-records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A target field of the child import.
///
/// Serialized with its camelCase wire name (`memberNumber`, `parent1Email`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    MemberNumber,
    FirstName,
    LastName,
    BirthDate,
    EntryDate,
    ExitDate,
    Street,
    HouseNumber,
    PostalCode,
    City,
    CareHours,
    Parent1FirstName,
    Parent1LastName,
    Parent1Email,
    Parent1Phone,
    Parent2FirstName,
    Parent2LastName,
    Parent2Email,
    Parent2Phone,
}

impl FieldKey {
    /// All fields in display order (child first, then parent 1, then parent 2).
    pub const ALL: [FieldKey; 19] = [
        FieldKey::MemberNumber,
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::BirthDate,
        FieldKey::EntryDate,
        FieldKey::ExitDate,
        FieldKey::Street,
        FieldKey::HouseNumber,
        FieldKey::PostalCode,
        FieldKey::City,
        FieldKey::CareHours,
        FieldKey::Parent1FirstName,
        FieldKey::Parent1LastName,
        FieldKey::Parent1Email,
        FieldKey::Parent1Phone,
        FieldKey::Parent2FirstName,
        FieldKey::Parent2LastName,
        FieldKey::Parent2Email,
        FieldKey::Parent2Phone,
    ];

    /// Fields that must be mapped before the preview can be requested.
    pub const REQUIRED_FOR_PREVIEW: [FieldKey; 1] = [FieldKey::MemberNumber];

    /// Child fields that must be non-empty for a row to be importable.
    pub const REQUIRED_FOR_ROW: [FieldKey; 5] = [
        FieldKey::MemberNumber,
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::BirthDate,
        FieldKey::EntryDate,
    ];

    /// The camelCase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::MemberNumber => "memberNumber",
            FieldKey::FirstName => "firstName",
            FieldKey::LastName => "lastName",
            FieldKey::BirthDate => "birthDate",
            FieldKey::EntryDate => "entryDate",
            FieldKey::ExitDate => "exitDate",
            FieldKey::Street => "street",
            FieldKey::HouseNumber => "houseNumber",
            FieldKey::PostalCode => "postalCode",
            FieldKey::City => "city",
            FieldKey::CareHours => "careHours",
            FieldKey::Parent1FirstName => "parent1FirstName",
            FieldKey::Parent1LastName => "parent1LastName",
            FieldKey::Parent1Email => "parent1Email",
            FieldKey::Parent1Phone => "parent1Phone",
            FieldKey::Parent2FirstName => "parent2FirstName",
            FieldKey::Parent2LastName => "parent2LastName",
            FieldKey::Parent2Email => "parent2Email",
            FieldKey::Parent2Phone => "parent2Phone",
        }
    }

    /// German display label shown on the mapping screen.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::MemberNumber => "Mitgliedsnummer",
            FieldKey::FirstName => "Vorname",
            FieldKey::LastName => "Nachname",
            FieldKey::BirthDate => "Geburtsdatum",
            FieldKey::EntryDate => "Eintrittsdatum",
            FieldKey::ExitDate => "Austrittsdatum",
            FieldKey::Street => "Straße",
            FieldKey::HouseNumber => "Hausnummer",
            FieldKey::PostalCode => "PLZ",
            FieldKey::City => "Ort",
            FieldKey::CareHours => "Betreuungsstunden",
            FieldKey::Parent1FirstName => "Elternteil 1 Vorname",
            FieldKey::Parent1LastName => "Elternteil 1 Nachname",
            FieldKey::Parent1Email => "Elternteil 1 E-Mail",
            FieldKey::Parent1Phone => "Elternteil 1 Telefon",
            FieldKey::Parent2FirstName => "Elternteil 2 Vorname",
            FieldKey::Parent2LastName => "Elternteil 2 Nachname",
            FieldKey::Parent2Email => "Elternteil 2 E-Mail",
            FieldKey::Parent2Phone => "Elternteil 2 Telefon",
        }
    }

    /// The parent sub-record this field belongs to, if any.
    pub fn parent_slot(&self) -> Option<ParentSlot> {
        match self {
            FieldKey::Parent1FirstName
            | FieldKey::Parent1LastName
            | FieldKey::Parent1Email
            | FieldKey::Parent1Phone => Some(ParentSlot::First),
            FieldKey::Parent2FirstName
            | FieldKey::Parent2LastName
            | FieldKey::Parent2Email
            | FieldKey::Parent2Phone => Some(ParentSlot::Second),
            _ => None,
        }
    }

    pub fn is_child_field(&self) -> bool {
        self.parent_slot().is_none()
    }

    pub fn is_required_for_preview(&self) -> bool {
        Self::REQUIRED_FOR_PREVIEW.contains(self)
    }

    pub fn is_required_for_row(&self) -> bool {
        Self::REQUIRED_FOR_ROW.contains(self)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = ModelError;

    /// Accepts the wire name in any casing, with or without separators
    /// (`memberNumber`, `member_number`, `MEMBER-NUMBER`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        FieldKey::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// One of the two parent sub-records of an import row.
///
/// Serialized as the number `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ParentSlot {
    First,
    Second,
}

impl ParentSlot {
    pub const BOTH: [ParentSlot; 2] = [ParentSlot::First, ParentSlot::Second];

    pub fn number(self) -> u8 {
        match self {
            ParentSlot::First => 1,
            ParentSlot::Second => 2,
        }
    }
}

impl From<ParentSlot> for u8 {
    fn from(slot: ParentSlot) -> Self {
        slot.number()
    }
}

impl TryFrom<u8> for ParentSlot {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ParentSlot::First),
            2 => Ok(ParentSlot::Second),
            other => Err(ModelError::InvalidParentSlot(other)),
        }
    }
}

impl fmt::Display for ParentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
