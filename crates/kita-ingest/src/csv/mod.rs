//! Delimited-text reading utilities.

mod decode;
mod reader;
mod separator;

pub use decode::{TextEncoding, decode_text};
pub use reader::{
    MAX_FILE_SIZE, SAMPLE_ROWS, SUPPORTED_EXTENSIONS, check_extension, parse_delimited,
    read_delimited_file, read_file_bytes,
};
pub use separator::detect_separator;
