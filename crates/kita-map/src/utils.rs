//! Utility functions for mapping operations.

use rapidfuzz::distance::jaro_winkler;

/// Minimum similarity for a header to be offered as a correction.
const SUGGESTION_MIN_SIMILARITY: f64 = 0.8;

/// Normalizes a header for keyword matching: lowercase and trimmed.
/// Inner spacing and punctuation are kept as they are ("e-mail").
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Finds the header most similar to `wanted`, for "did you mean" hints.
pub fn closest_header<'a>(wanted: &str, headers: &'a [String]) -> Option<&'a str> {
    let wanted = normalize_header(wanted);
    headers
        .iter()
        .map(|header| {
            let score = jaro_winkler::similarity(wanted.chars(), normalize_header(header).chars());
            (header.as_str(), score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_MIN_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(header, _)| header)
}
