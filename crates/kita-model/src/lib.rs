//! Data model for the childcare import workflow.
//!
//! These types mirror the JSON exchanged with the import backend
//! (camelCase on the wire) and are shared by every crate of the workspace.

pub mod error;
pub mod execute;
pub mod field;
pub mod mapping;
pub mod parsed;
pub mod preview;

pub use error::{ModelError, Result};
pub use execute::{
    ExecuteAction, ExecuteRequest, ExecuteResult, ExecuteRow, ParentAction, ParentDecision,
    RowError,
};
pub use field::{FieldKey, ParentSlot};
pub use mapping::FieldMapping;
pub use parsed::{ParsedFile, Separator};
pub use preview::{
    ChildRecord, ExistingChild, ExistingParent, FieldConflict, ParentRecord, PreviewRequest,
    PreviewResponse, PreviewRow,
};
