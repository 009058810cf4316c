//! Delimited-text parsing into a [`ParsedFile`].

use std::path::Path;

use csv::ReaderBuilder;
use kita_model::{ParsedFile, Separator};

use crate::error::{IngestError, Result};

use super::decode::decode_text;
use super::separator::detect_separator;

/// Maximum upload size (10 MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Number of data rows kept for the mapping screen.
pub const SAMPLE_ROWS: usize = 5;

/// File extensions accepted as delimited text.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// Header and cell text with outer whitespace and stray BOMs removed. Inner
/// spacing is kept; header detection matches against it as written.
fn clean_field(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Checks the file name against [`SUPPORTED_EXTENSIONS`].
pub fn check_extension(name: &str) -> Result<()> {
    let supported = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if supported {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFormat {
            name: name.to_string(),
        })
    }
}

/// Parses an uploaded file into headers, separator, sample rows and row count.
///
/// The first non-empty row is the header row. Blank rows are skipped and data
/// rows are padded or truncated to the header width.
pub fn parse_delimited(name: &str, bytes: &[u8]) -> Result<ParsedFile> {
    check_extension(name)?;
    if bytes.len() as u64 > MAX_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            name: name.to_string(),
            size: bytes.len() as u64,
            max_size: MAX_FILE_SIZE,
        });
    }

    let (text, encoding) = decode_text(name, bytes)?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            name: name.to_string(),
        });
    }

    let separator = detect_separator(&text);
    let (headers, sample_rows, total_rows) = read_records(name, &text, separator)?;

    tracing::debug!(
        file = name,
        separator = %separator,
        encoding = ?encoding,
        columns = headers.len(),
        rows = total_rows,
        "parsed delimited file"
    );

    Ok(ParsedFile {
        headers,
        detected_separator: separator,
        sample_rows,
        total_rows,
    })
}

/// Reads a file from disk and parses it with [`parse_delimited`].
pub fn read_delimited_file(path: &Path) -> Result<ParsedFile> {
    let bytes = read_file_bytes(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_delimited(&name, &bytes)
}

/// Reads raw file bytes, enforcing [`MAX_FILE_SIZE`].
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e))?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            name: path.display().to_string(),
            size: metadata.len(),
            max_size: MAX_FILE_SIZE,
        });
    }
    std::fs::read(path).map_err(|e| map_io_error(path, e))
}

fn map_io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

type Records = (Vec<String>, Vec<Vec<String>>, usize);

fn read_records(name: &str, text: &str, separator: Separator) -> Result<Records> {
    let mut reader = ReaderBuilder::new()
        .delimiter(separator.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut sample_rows = Vec::new();
    let mut total_rows = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Parse {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => {
                let row: Vec<String> = record.iter().map(clean_field).collect();
                if row.iter().all(String::is_empty) {
                    return Err(IngestError::NoHeaderDetected {
                        name: name.to_string(),
                    });
                }
                headers = Some(row);
            }
            Some(columns) => {
                total_rows += 1;
                if sample_rows.len() < SAMPLE_ROWS {
                    let row: Vec<String> = (0..columns.len())
                        .map(|idx| record.get(idx).map(clean_field).unwrap_or_default())
                        .collect();
                    sample_rows.push(row);
                }
            }
        }
    }

    let headers = headers.ok_or_else(|| IngestError::NoHeaderDetected {
        name: name.to_string(),
    })?;
    Ok((headers, sample_rows, total_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn parses_semicolon_file() {
        let parsed = parse_delimited(
            "kinder.csv",
            b"Mitgliedsnummer;Vorname;Nachname\n100;Mia;Weber\n\n101;Ben;Roth\n",
        )
        .unwrap();

        assert_eq!(parsed.headers, vec!["Mitgliedsnummer", "Vorname", "Nachname"]);
        assert_eq!(parsed.detected_separator, Separator::Semicolon);
        assert_eq!(parsed.total_rows, 2);
        assert_eq!(parsed.sample_rows[1], vec!["101", "Ben", "Roth"]);
    }

    #[test]
    fn pads_short_rows_to_header_width() {
        let parsed = parse_delimited("kinder.csv", b"A;B;C\n1;2\n").unwrap();
        assert_eq!(parsed.sample_rows[0], vec!["1", "2", ""]);
    }

    #[test]
    fn keeps_only_sample_rows() {
        let mut content = String::from("Nr,Name\n");
        for i in 0..12 {
            content.push_str(&format!("{i},Kind {i}\n"));
        }
        let parsed = parse_delimited("kinder.csv", content.as_bytes()).unwrap();
        assert_eq!(parsed.total_rows, 12);
        assert_eq!(parsed.sample_rows.len(), SAMPLE_ROWS);
    }

    #[test]
    fn trims_headers_but_keeps_inner_spacing() {
        let parsed = parse_delimited("kinder.csv", b" Elternteil  1   Vorname ;Nr\nA;1\n").unwrap();
        assert_eq!(parsed.headers, vec!["Elternteil  1   Vorname", "Nr"]);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let result = parse_delimited("kinder.xlsx", b"A;B\n1;2\n");
        assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
    }

    #[test]
    fn rejects_empty_file() {
        let result = parse_delimited("kinder.csv", b" \n\n");
        assert!(matches!(result, Err(IngestError::EmptyFile { .. })));
    }

    #[test]
    fn rejects_blank_header_row() {
        let result = parse_delimited("kinder.csv", b";;\n");
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }

    #[test]
    fn reads_file_from_disk() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "Nr\tName\n1\tMia\n").unwrap();
        let parsed = read_delimited_file(file.path()).unwrap();
        assert_eq!(parsed.detected_separator, Separator::Tab);
        assert_eq!(parsed.total_rows, 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let result = read_delimited_file(Path::new("/nonexistent/kinder.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
