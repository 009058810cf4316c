//! HTTP client for the childcare import backend.
//!
//! [`HttpImportService`] implements [`kita_import::ImportService`] with
//! blocking `reqwest` calls, so the wizard's `run_*` helpers can drive a
//! real server.

pub mod client;
pub mod config;
pub mod error;

pub use client::{HttpImportService, ParseBody, error_message};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
