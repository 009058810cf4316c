//! Header auto-detection.
//!
//! Produces a best-effort [`FieldMapping`] from a file's header row. The
//! result is only a suggestion; every assignment stays user-editable.

use std::collections::BTreeSet;

use kita_model::{FieldKey, FieldMapping};

use crate::keywords::{FIELD_KEYWORDS, KeywordTable};
use crate::utils::normalize_header;

/// A keyword of a field found inside a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    pub field: FieldKey,
    pub keyword: &'static str,
}

/// The field assigned to one header and the keyword that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub column: usize,
    pub header: String,
    pub field: FieldKey,
    pub keyword: &'static str,
}

/// All keywords contained in the normalized header, in table order.
///
/// Containment is one-directional: the header must contain the keyword.
pub fn candidates(header: &str) -> Vec<KeywordMatch> {
    candidates_in(FIELD_KEYWORDS, header)
}

fn candidates_in(table: KeywordTable, header: &str) -> Vec<KeywordMatch> {
    let normalized = normalize_header(header);
    if normalized.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();
    for (field, keywords) in table {
        for keyword in *keywords {
            if normalized.contains(keyword) {
                found.push(KeywordMatch {
                    field: *field,
                    keyword: *keyword,
                });
            }
        }
    }
    found
}

/// Picks the longest matching keyword among fields not yet taken.
///
/// Ties keep the first candidate in table order.
fn best_candidate(
    table: KeywordTable,
    header: &str,
    taken: &BTreeSet<FieldKey>,
) -> Option<KeywordMatch> {
    let mut best: Option<KeywordMatch> = None;
    for candidate in candidates_in(table, header) {
        if taken.contains(&candidate.field) {
            continue;
        }
        let longer = best.is_none_or(|b| candidate.keyword.len() > b.keyword.len());
        if longer {
            best = Some(candidate);
        }
    }
    best
}

/// Runs detection and reports which keyword decided each assignment.
pub fn detect_matches(headers: &[String]) -> Vec<HeaderMatch> {
    detect_matches_in(FIELD_KEYWORDS, headers)
}

fn detect_matches_in(table: KeywordTable, headers: &[String]) -> Vec<HeaderMatch> {
    let mut taken = BTreeSet::new();
    let mut matches = Vec::new();
    for (column, header) in headers.iter().enumerate() {
        let Some(best) = best_candidate(table, header, &taken) else {
            continue;
        };
        taken.insert(best.field);
        matches.push(HeaderMatch {
            column,
            header: header.clone(),
            field: best.field,
            keyword: best.keyword,
        });
    }
    matches
}

/// Suggests a mapping for the given header row.
///
/// Each header maps to at most one field and each field to at most one
/// header; a field keeps the first header that claimed it. Headers without a
/// matching keyword stay unmapped.
pub fn auto_detect(headers: &[String]) -> FieldMapping {
    let mapping: FieldMapping = detect_matches(headers)
        .into_iter()
        .map(|m| (m.field, m.column))
        .collect();
    tracing::debug!(
        headers = headers.len(),
        mapped = mapping.len(),
        "auto-detected column mapping"
    );
    mapping
}
