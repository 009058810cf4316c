//! Error types for mapping operations.

use kita_model::FieldKey;
use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Column index outside the header row.
    #[error("column {column} does not exist (file has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },
    /// No header with this name.
    #[error("column not found: {name}{}", suggestion_hint(.suggestion))]
    ColumnNotFound {
        name: String,
        suggestion: Option<String>,
    },
    /// Fields that must be mapped before the preview.
    #[error("required fields not mapped: {}", field_list(.fields))]
    MissingRequired { fields: Vec<FieldKey> },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

fn field_list(fields: &[FieldKey]) -> String {
    fields
        .iter()
        .map(FieldKey::label)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_lists_labels() {
        let err = MappingError::MissingRequired {
            fields: vec![FieldKey::MemberNumber],
        };
        assert_eq!(err.to_string(), "required fields not mapped: Mitgliedsnummer");
    }

    #[test]
    fn not_found_includes_suggestion() {
        let err = MappingError::ColumnNotFound {
            name: "Vornam".to_string(),
            suggestion: Some("Vorname".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "column not found: Vornam (did you mean 'Vorname'?)"
        );
    }
}
