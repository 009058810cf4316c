//! Text decoding of uploaded bytes.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;

use crate::error::{IngestError, Result};

/// Encoding a file was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// Legacy spreadsheet exports on Windows.
    Windows1252,
}

/// Decodes raw file bytes to text.
///
/// UTF-8 (with or without BOM) is read as is; anything that is not valid
/// UTF-8 is read as Windows-1252. UTF-16 is rejected.
pub fn decode_text<'a>(name: &str, bytes: &'a [u8]) -> Result<(Cow<'a, str>, TextEncoding)> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            name: name.to_string(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            name: name.to_string(),
            encoding: "UTF-16 BE",
        });
    }

    let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok((Cow::Borrowed(text), TextEncoding::Utf8)),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
            tracing::debug!(file = name, "file is not UTF-8, decoded as Windows-1252");
            Ok((text, TextEncoding::Windows1252))
        }
    }
}
