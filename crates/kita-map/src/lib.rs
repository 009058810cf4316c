//! Column mapping for the childcare import.
//!
//! [`auto_detect`] suggests a [`FieldMapping`](kita_model::FieldMapping) from
//! a header row by keyword containment; [`MappingState`] lets the user adjust
//! the suggestion and checks that the required fields are mapped.

pub mod detect;
pub mod error;
pub mod keywords;
pub mod state;
mod utils;

pub use detect::{HeaderMatch, KeywordMatch, auto_detect, candidates, detect_matches};
pub use error::{MappingError, Result};
pub use keywords::{FIELD_KEYWORDS, KeywordTable, keywords_for};
pub use state::{FieldMappingStatus, MappingState, MappingSummary};
pub use utils::{closest_header, normalize_header};
