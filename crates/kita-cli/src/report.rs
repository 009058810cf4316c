//! JSON report written by `run --report`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use kita_import::ImportReport;
use kita_model::{ExecuteRequest, ExecuteResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFile<'a> {
    pub generated_at: DateTime<Utc>,
    pub file_name: &'a str,
    /// SHA-256 of the uploaded bytes.
    pub sha256: &'a str,
    pub submitted_rows: usize,
    /// Row indices of submitted rows without an error.
    pub committed_rows: Vec<usize>,
    pub result: &'a ExecuteResult,
    pub error_lines: Vec<String>,
}

impl<'a> ReportFile<'a> {
    pub fn new(
        file_name: &'a str,
        sha256: &'a str,
        request: &ExecuteRequest,
        result: &'a ExecuteResult,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let report = ImportReport::from_result(result);
        Self {
            generated_at,
            file_name,
            sha256,
            submitted_rows: request.rows.len(),
            committed_rows: report.committed_rows(request),
            result,
            error_lines: report.error_lines(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize report")?;
        fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote import report");
        Ok(())
    }
}
