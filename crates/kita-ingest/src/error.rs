//! Error types for file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the upload limit.
    #[error("file too large: {name} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        name: String,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    /// File extension is not a delimited-text format.
    #[error("unsupported file format: {name} (expected .csv, .tsv or .txt)")]
    UnsupportedFormat { name: String },

    /// Text encoding cannot be read.
    #[error("unsupported encoding {encoding} in {name}")]
    UnsupportedEncoding {
        name: String,
        encoding: &'static str,
    },

    /// File has no content.
    #[error("file is empty: {name}")]
    EmptyFile { name: String },

    /// First row has no column names.
    #[error("could not detect header row in {name}")]
    NoHeaderDetected { name: String },

    // === Parsing Errors ===
    /// Delimited text could not be parsed.
    #[error("failed to parse {name}: {message}")]
    Parse { name: String, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            name: "kinder.xlsx".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format: kinder.xlsx (expected .csv, .tsv or .txt)"
        );
    }
}
