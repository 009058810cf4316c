//! Separator detection.

use kita_model::Separator;

/// Number of non-empty lines inspected when guessing the separator.
const PROBE_LINES: usize = 10;

/// Counts separator occurrences outside of double quotes.
fn count_unquoted(line: &str, separator: char) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == separator && !in_quotes => count += 1,
            _ => {}
        }
    }
    count
}

/// Guesses the column separator from the first lines of a file.
///
/// A separator scores by how many probed lines share the header line's
/// column count, then by that count. Ties keep the earlier candidate in
/// [`Separator::ALL`]. Single-column files fall back to `;`.
pub fn detect_separator(text: &str) -> Separator {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(PROBE_LINES)
        .collect();
    let Some(first) = lines.first() else {
        return Separator::default();
    };

    let mut best: Option<(Separator, usize, usize)> = None;
    for separator in Separator::ALL {
        let header_count = count_unquoted(first, separator.as_char());
        if header_count == 0 {
            continue;
        }
        let consistent = lines
            .iter()
            .filter(|line| count_unquoted(line, separator.as_char()) == header_count)
            .count();
        let better = match best {
            None => true,
            Some((_, best_consistent, best_count)) => {
                (consistent, header_count) > (best_consistent, best_count)
            }
        };
        if better {
            best = Some((separator, consistent, header_count));
        }
    }
    best.map(|(separator, _, _)| separator).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_semicolon_export() {
        let text = "Mitgliedsnummer;Vorname;Betreuungsstunden\n100;Mia;7,5\n101;Ben;35\n";
        assert_eq!(detect_separator(text), Separator::Semicolon);
    }

    #[test]
    fn detects_comma() {
        let text = "member,first,last\n1,Mia,Weber\n2,Ben,Roth\n";
        assert_eq!(detect_separator(text), Separator::Comma);
    }

    #[test]
    fn detects_tab() {
        let text = "member\tfirst\tlast\n1\tMia\tWeber, Anna\n";
        assert_eq!(detect_separator(text), Separator::Tab);
    }

    #[test]
    fn ignores_separators_inside_quotes() {
        let text = "\"Name, Vorname\";Nr\n\"Weber, Mia\";1\n";
        assert_eq!(detect_separator(text), Separator::Semicolon);
    }

    #[test]
    fn single_column_defaults_to_semicolon() {
        assert_eq!(detect_separator("Nr\n1\n2\n"), Separator::Semicolon);
        assert_eq!(detect_separator(""), Separator::Semicolon);
    }
}
