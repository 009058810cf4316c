//! The backend operations the wizard depends on.

use kita_model::{
    ExecuteRequest, ExecuteResult, ParsedFile, PreviewRequest, PreviewResponse,
};

use crate::error::ServiceError;

/// Remote import operations. Calls block until the backend answers.
///
/// Every call is safe to repeat: a retry sends the full current state.
pub trait ImportService {
    /// Parses an uploaded file into headers and sample rows.
    fn parse(&self, file_name: &str, bytes: &[u8]) -> Result<ParsedFile, ServiceError>;

    /// Classifies every row of the file under the given mapping.
    fn preview(&self, request: &PreviewRequest) -> Result<PreviewResponse, ServiceError>;

    /// Commits the reconciled rows.
    fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, ServiceError>;
}

impl<S: ImportService + ?Sized> ImportService for &S {
    fn parse(&self, file_name: &str, bytes: &[u8]) -> Result<ParsedFile, ServiceError> {
        (**self).parse(file_name, bytes)
    }

    fn preview(&self, request: &PreviewRequest) -> Result<PreviewResponse, ServiceError> {
        (**self).preview(request)
    }

    fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, ServiceError> {
        (**self).execute(request)
    }
}
