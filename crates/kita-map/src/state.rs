//! Mapping state for the interactive mapping step.
//!
//! Holds the header row, the auto-detected suggestion and the mapping the
//! user is editing. The suggestion is kept so a field can be reset to it.

use std::collections::BTreeSet;

use kita_model::{FieldKey, FieldMapping};

use crate::detect::auto_detect;
use crate::error::{MappingError, Result};
use crate::utils::closest_header;

/// Mapping state for one parsed file.
#[derive(Debug, Clone)]
pub struct MappingState {
    headers: Vec<String>,
    suggested: FieldMapping,
    current: FieldMapping,
}

impl MappingState {
    /// Creates the state and seeds it with the auto-detected mapping.
    pub fn from_headers(headers: Vec<String>) -> Self {
        let suggested = auto_detect(&headers);
        Self {
            headers,
            current: suggested.clone(),
            suggested,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.current
    }

    pub fn into_mapping(self) -> FieldMapping {
        self.current
    }

    /// The auto-detected column for a field.
    pub fn suggestion_for(&self, field: FieldKey) -> Option<usize> {
        self.suggested.get(field)
    }

    /// Header text of the column assigned to `field`.
    pub fn header_for(&self, field: FieldKey) -> Option<&str> {
        self.current
            .get(field)
            .and_then(|column| self.headers.get(column))
            .map(String::as_str)
    }

    pub fn status(&self, field: FieldKey) -> FieldMappingStatus {
        match self.current.get(field) {
            None => FieldMappingStatus::Unmapped,
            Some(column) if self.suggested.get(field) == Some(column) => {
                FieldMappingStatus::Suggested
            }
            Some(_) => FieldMappingStatus::Manual,
        }
    }

    /// Assigns a column to a field.
    ///
    /// A column maps to at most one field: if another field held the column
    /// it is unmapped and returned.
    pub fn assign(&mut self, field: FieldKey, column: usize) -> Result<Option<FieldKey>> {
        if column >= self.headers.len() {
            return Err(MappingError::ColumnOutOfRange {
                column,
                columns: self.headers.len(),
            });
        }
        let displaced = self
            .current
            .field_for_column(column)
            .filter(|other| *other != field);
        if let Some(other) = displaced {
            self.current.remove(other);
        }
        self.current.set(field, column);
        tracing::debug!(%field, column, displaced = ?displaced, "assigned column");
        Ok(displaced)
    }

    /// Assigns the column with the given header text (case-insensitive).
    pub fn assign_by_header(&mut self, field: FieldKey, header: &str) -> Result<Option<FieldKey>> {
        let wanted = header.trim();
        let column = self
            .headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MappingError::ColumnNotFound {
                name: wanted.to_string(),
                suggestion: closest_header(wanted, &self.headers).map(str::to_string),
            })?;
        self.assign(field, column)
    }

    /// Clears the mapping for a field.
    pub fn clear(&mut self, field: FieldKey) -> bool {
        self.current.remove(field).is_some()
    }

    /// Restores the auto-detected column for a field.
    ///
    /// Returns the field displaced by the restored column, if any.
    pub fn reset_to_suggestion(&mut self, field: FieldKey) -> Option<FieldKey> {
        match self.suggested.get(field) {
            Some(column) => self.assign(field, column).ok().flatten(),
            None => {
                self.current.remove(field);
                None
            }
        }
    }

    /// Discards all manual changes.
    pub fn reset_all(&mut self) {
        self.current = self.suggested.clone();
    }

    pub fn is_column_used(&self, column: usize) -> bool {
        self.current.field_for_column(column).is_some()
    }

    /// Column indices not assigned to any field.
    pub fn available_columns(&self) -> Vec<usize> {
        let used: BTreeSet<usize> = self.current.iter().map(|(_, column)| column).collect();
        (0..self.headers.len())
            .filter(|column| !used.contains(column))
            .collect()
    }

    /// Headers not assigned to any field.
    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.available_columns()
            .into_iter()
            .filter_map(|column| self.headers.get(column))
            .map(String::as_str)
            .collect()
    }

    pub fn missing_required(&self) -> Vec<FieldKey> {
        self.current.missing_required()
    }

    /// Checks that the mapping can be sent to the preview.
    pub fn validate(&self) -> Result<()> {
        let fields = self.missing_required();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(MappingError::MissingRequired { fields })
        }
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total_fields: FieldKey::ALL.len(),
            total_columns: self.headers.len(),
            ..MappingSummary::default()
        };
        for field in FieldKey::ALL {
            match self.status(field) {
                FieldMappingStatus::Suggested => summary.suggested += 1,
                FieldMappingStatus::Manual => summary.manual += 1,
                FieldMappingStatus::Unmapped => continue,
            }
            summary.mapped += 1;
            if field.is_required_for_row() {
                summary.required_mapped += 1;
            }
        }
        summary.required_total = FieldKey::REQUIRED_FOR_ROW.len();
        summary
    }
}

/// Status of a field's mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMappingStatus {
    /// Mapped to the auto-detected column.
    Suggested,
    /// Mapped by the user to a different column.
    Manual,
    Unmapped,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingSummary {
    pub total_fields: usize,
    pub total_columns: usize,
    pub mapped: usize,
    pub suggested: usize,
    pub manual: usize,
    /// Fields a row needs to be importable.
    pub required_total: usize,
    pub required_mapped: usize,
}
