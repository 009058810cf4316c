//! Ingestion of uploaded child lists.
//!
//! This crate turns the raw bytes of an uploaded delimited-text file into a
//! [`kita_model::ParsedFile`]: headers, detected separator, sample rows and
//! row count.
//!
//! # Features
//!
//! - **Format check**: `.csv`, `.tsv` and `.txt` only, with an upload size limit
//! - **Decoding**: UTF-8 with or without BOM, Windows-1252 fallback, UTF-16 rejected
//! - **Separator detection**: `;`, `,` or tab, by column-count consistency
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use kita_ingest::read_delimited_file;
//!
//! let parsed = read_delimited_file(Path::new("kinder.csv"))?;
//! println!("{} columns, {} rows", parsed.headers.len(), parsed.total_rows);
//! ```

mod csv;
mod error;
mod fingerprint;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsing ===
pub use csv::{
    MAX_FILE_SIZE, SAMPLE_ROWS, SUPPORTED_EXTENSIONS, TextEncoding, check_extension, decode_text,
    detect_separator, parse_delimited, read_delimited_file, read_file_bytes,
};

// === Upload identity ===
pub use fingerprint::file_fingerprint;
