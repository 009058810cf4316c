use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Column separator of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Separator {
    #[default]
    #[serde(rename = ";")]
    Semicolon,
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "\t")]
    Tab,
}

impl Separator {
    /// Candidates in tie-break order; German spreadsheet exports use `;`.
    pub const ALL: [Separator; 3] = [Separator::Semicolon, Separator::Comma, Separator::Tab];

    pub fn as_char(self) -> char {
        match self {
            Separator::Semicolon => ';',
            Separator::Comma => ',',
            Separator::Tab => '\t',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Separator::Semicolon => "semicolon",
            Separator::Comma => "comma",
            Separator::Tab => "tab",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Separator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ";" => return Ok(Separator::Semicolon),
            "," => return Ok(Separator::Comma),
            "\t" => return Ok(Separator::Tab),
            _ => {}
        }
        match s.trim().to_lowercase().as_str() {
            "semicolon" => Ok(Separator::Semicolon),
            "comma" => Ok(Separator::Comma),
            "tab" | "\\t" => Ok(Separator::Tab),
            _ => Err(ModelError::InvalidSeparator(s.to_string())),
        }
    }
}

/// Result of parsing an uploaded file.
///
/// Produced once per upload and never patched; a new upload replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub headers: Vec<String>,
    pub detected_separator: Separator,
    pub sample_rows: Vec<Vec<String>>,
    /// Number of data rows, header excluded.
    pub total_rows: usize,
}

impl ParsedFile {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn header(&self, column: usize) -> Option<&str> {
        self.headers.get(column).map(String::as_str)
    }

    /// Sample values of one column, for display next to the mapping choice.
    pub fn sample_values(&self, column: usize) -> Vec<&str> {
        self.sample_rows
            .iter()
            .filter_map(|row| row.get(column).map(String::as_str))
            .collect()
    }
}
