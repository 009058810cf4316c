//! Results stage summary.

use std::collections::BTreeSet;
use std::fmt;

use kita_model::{ExecuteRequest, ExecuteResult, RowError};

/// Summary of a finished import.
///
/// Row numbers are 1-indexed for display; the backend reports 0-indexed
/// row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub children_created: usize,
    pub children_updated: usize,
    pub parents_created: usize,
    pub parents_linked: usize,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn from_result(result: &ExecuteResult) -> Self {
        Self {
            children_created: result.children_created,
            children_updated: result.children_updated,
            parents_created: result.parents_created,
            parents_linked: result.parents_linked,
            errors: result.errors.clone(),
        }
    }

    /// Row number shown to the user for a row index.
    pub fn display_row(row_index: usize) -> usize {
        row_index + 1
    }

    /// One line per row error.
    pub fn error_lines(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("Row {}: {}", Self::display_row(e.row_index), e.error))
            .collect()
    }

    /// Submitted rows not listed in the errors, which count as committed.
    pub fn committed_rows(&self, request: &ExecuteRequest) -> Vec<usize> {
        let failed: BTreeSet<usize> = self.errors.iter().map(|e| e.row_index).collect();
        request
            .rows
            .iter()
            .map(|row| row.index)
            .filter(|index| !failed.contains(index))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Children created: {}", self.children_created)?;
        writeln!(f, "Children updated: {}", self.children_updated)?;
        writeln!(f, "Parents created:  {}", self.parents_created)?;
        writeln!(f, "Parents linked:   {}", self.parents_linked)?;
        if self.errors.is_empty() {
            return Ok(());
        }
        writeln!(f, "Errors:")?;
        for line in self.error_lines() {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_line_uses_display_row() {
        let report = ImportReport::from_result(&ExecuteResult {
            children_created: 3,
            parents_created: 4,
            errors: vec![RowError {
                row_index: 2,
                error: "duplicate member number".to_string(),
            }],
            ..ExecuteResult::default()
        });

        assert_eq!(report.error_lines(), vec!["Row 3: duplicate member number"]);
        insta::assert_snapshot!(report.to_string(), @r"
        Children created: 3
        Children updated: 0
        Parents created:  4
        Parents linked:   0
        Errors:
          Row 3: duplicate member number
        ");
    }

    #[test]
    fn clean_result_has_no_error_section() {
        let report = ImportReport::from_result(&ExecuteResult {
            children_updated: 1,
            parents_linked: 2,
            ..ExecuteResult::default()
        });
        assert!(!report.has_errors());
        insta::assert_snapshot!(report.to_string(), @r"
        Children created: 0
        Children updated: 1
        Parents created:  0
        Parents linked:   2
        ");
    }
}
