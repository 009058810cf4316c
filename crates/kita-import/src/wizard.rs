//! The four-stage import wizard.
//!
//! `Upload -> Mapping -> Preview -> Results`. Each remote transition is split
//! in two: `begin_*` checks the stage precondition, marks the wizard busy and
//! returns the request to send together with its [`RequestId`]; `finish_*`
//! consumes the backend's answer and must present the same id. A second
//! `begin_*` while a request is pending is refused, and an answer whose id is
//! not the pending one is refused as well. A failed call leaves the stage and
//! its state untouched and stores a dismissible message.
//!
//! The `run_*` helpers do both halves against a blocking [`ImportService`].

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use kita_map::MappingState;
use kita_model::{
    ExecuteRequest, ExecuteResult, ParsedFile, PreviewRequest, PreviewResponse,
};

use crate::error::{Result, ServiceError, WizardError};
use crate::reconcile::Reconciliation;
use crate::report::ImportReport;
use crate::service::ImportService;

/// Stage of the wizard without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageKind {
    Upload,
    Mapping,
    Preview,
    Results,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Upload => "upload",
            StageKind::Mapping => "mapping",
            StageKind::Preview => "preview",
            StageKind::Results => "results",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw upload, kept for the preview call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Body of the parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MappingStage {
    pub file: UploadedFile,
    pub parsed: ParsedFile,
    pub mapping: MappingState,
}

#[derive(Debug, Clone)]
pub struct PreviewStage {
    pub file: UploadedFile,
    pub parsed: ParsedFile,
    pub mapping: MappingState,
    pub reconciliation: Reconciliation,
}

#[derive(Debug, Clone)]
pub struct ResultsStage {
    pub request: ExecuteRequest,
    pub result: ExecuteResult,
    pub report: ImportReport,
}

/// A stage together with the state it owns.
#[derive(Debug, Clone, Default)]
pub enum Stage {
    #[default]
    Upload,
    Mapping(Box<MappingStage>),
    Preview(Box<PreviewStage>),
    Results(Box<ResultsStage>),
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Upload => StageKind::Upload,
            Stage::Mapping(_) => StageKind::Mapping,
            Stage::Preview(_) => StageKind::Preview,
            Stage::Results(_) => StageKind::Results,
        }
    }
}

/// Identifies one issued request. Ids are never reused by a wizard, not even
/// across [`ImportWizard::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request in flight, with what its answer needs.
#[derive(Debug, Clone)]
struct Pending {
    id: RequestId,
    call: Call,
}

#[derive(Debug, Clone)]
enum Call {
    Parse(UploadedFile),
    Preview,
    Execute(ExecuteRequest),
}

/// Import wizard state.
#[derive(Debug, Clone, Default)]
pub struct ImportWizard {
    stage: Stage,
    pending: Option<Pending>,
    error: Option<String>,
    skip_header: bool,
    issued: u64,
}

impl ImportWizard {
    pub fn new() -> Self {
        Self::with_skip_header(true)
    }

    /// Whether the preview should skip the file's first line.
    pub fn with_skip_header(skip_header: bool) -> Self {
        Self {
            skip_header,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_kind(&self) -> StageKind {
        self.stage.kind()
    }

    /// A remote call is in flight; forward actions are disabled.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Message of the last failed call.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn mapping_stage(&self) -> Option<&MappingStage> {
        match &self.stage {
            Stage::Mapping(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn mapping_mut(&mut self) -> Option<&mut MappingState> {
        match &mut self.stage {
            Stage::Mapping(stage) => Some(&mut stage.mapping),
            _ => None,
        }
    }

    pub fn preview_stage(&self) -> Option<&PreviewStage> {
        match &self.stage {
            Stage::Preview(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn reconciliation_mut(&mut self) -> Option<&mut Reconciliation> {
        match &mut self.stage {
            Stage::Preview(stage) => Some(&mut stage.reconciliation),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&ResultsStage> {
        match &self.stage {
            Stage::Results(stage) => Some(stage),
            _ => None,
        }
    }

    fn ensure_idle(&self, expected: StageKind) -> Result<()> {
        if self.is_busy() {
            return Err(WizardError::Busy);
        }
        let actual = self.stage_kind();
        if actual != expected {
            return Err(WizardError::WrongStage { expected, actual });
        }
        Ok(())
    }

    fn start(&mut self, call: Call) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.pending = Some(Pending { id, call });
        self.error = None;
        id
    }

    /// Takes the pending request if it is `id` and of the expected kind.
    fn take_pending(&mut self, id: RequestId, kind: fn(&Call) -> bool) -> Option<Call> {
        let pending = self.pending.take_if(|p| p.id == id && kind(&p.call));
        if pending.is_none() {
            tracing::debug!(request = %id, "answer without a matching pending request");
        }
        pending.map(|p| p.call)
    }

    /// Id of the request in flight, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|p| p.id)
    }

    /// Stores a failed call's message and hands the error back.
    fn fail(&mut self, stage: StageKind, error: ServiceError) -> WizardError {
        tracing::warn!(%stage, error = %error, "import request failed");
        self.error = Some(error.to_string());
        WizardError::Service(error)
    }

    /// Starts parsing an uploaded file.
    pub fn begin_parse(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(RequestId, ParseRequest)> {
        self.ensure_idle(StageKind::Upload)?;
        let request = ParseRequest {
            file_name: file_name.to_string(),
            bytes: bytes.clone(),
        };
        let id = self.start(Call::Parse(UploadedFile {
            name: file_name.to_string(),
            bytes,
        }));
        tracing::info!(file = file_name, size = request.bytes.len(), "parsing upload");
        Ok((id, request))
    }

    /// Completes the parse and opens the mapping stage with an auto-detected
    /// mapping.
    pub fn finish_parse(
        &mut self,
        id: RequestId,
        response: std::result::Result<ParsedFile, ServiceError>,
    ) -> Result<()> {
        let Some(Call::Parse(file)) = self.take_pending(id, |c| matches!(c, Call::Parse(_))) else {
            return Err(WizardError::NotPending);
        };
        let parsed = response.map_err(|e| self.fail(StageKind::Upload, e))?;
        if parsed.headers.is_empty() {
            self.error = Some(WizardError::NoHeaders.to_string());
            return Err(WizardError::NoHeaders);
        }

        let mapping = MappingState::from_headers(parsed.headers.clone());
        tracing::info!(
            columns = parsed.headers.len(),
            rows = parsed.total_rows,
            separator = parsed.detected_separator.name(),
            mapped = mapping.mapping().len(),
            "upload parsed"
        );
        self.stage = Stage::Mapping(Box::new(MappingStage {
            file,
            parsed,
            mapping,
        }));
        Ok(())
    }

    /// Starts the preview. Fails if a required field is unmapped.
    pub fn begin_preview(&mut self) -> Result<(RequestId, PreviewRequest)> {
        self.ensure_idle(StageKind::Mapping)?;
        let Stage::Mapping(stage) = &self.stage else {
            return Err(WizardError::WrongStage {
                expected: StageKind::Mapping,
                actual: self.stage_kind(),
            });
        };
        stage.mapping.validate()?;

        let request = PreviewRequest {
            file_content: BASE64.encode(&stage.file.bytes),
            separator: stage.parsed.detected_separator,
            mapping: stage.mapping.mapping().clone(),
            skip_header: self.skip_header,
        };
        let id = self.start(Call::Preview);
        tracing::info!(mapped = request.mapping.len(), "requesting preview");
        Ok((id, request))
    }

    /// Completes the preview and seeds a fresh reconciliation.
    pub fn finish_preview(
        &mut self,
        id: RequestId,
        response: std::result::Result<PreviewResponse, ServiceError>,
    ) -> Result<()> {
        if self
            .take_pending(id, |c| matches!(c, Call::Preview))
            .is_none()
        {
            return Err(WizardError::NotPending);
        }
        let response = response.map_err(|e| self.fail(StageKind::Mapping, e))?;
        let stage = match std::mem::take(&mut self.stage) {
            Stage::Mapping(stage) => stage,
            other => {
                self.stage = other;
                return Err(WizardError::NotPending);
            }
        };

        tracing::info!(
            rows = response.rows.len(),
            valid = response.valid_count,
            errors = response.error_count,
            "preview received"
        );
        let MappingStage {
            file,
            parsed,
            mapping,
        } = *stage;
        self.stage = Stage::Preview(Box::new(PreviewStage {
            file,
            parsed,
            mapping,
            reconciliation: Reconciliation::from_preview(response.rows),
        }));
        Ok(())
    }

    /// Starts the commit. Fails if no row is selected or merged.
    pub fn begin_execute(&mut self) -> Result<(RequestId, ExecuteRequest)> {
        self.ensure_idle(StageKind::Preview)?;
        let Stage::Preview(stage) = &self.stage else {
            return Err(WizardError::WrongStage {
                expected: StageKind::Preview,
                actual: self.stage_kind(),
            });
        };
        let request = stage.reconciliation.build_execute_request()?;
        let id = self.start(Call::Execute(request.clone()));
        Ok((id, request))
    }

    /// Completes the commit and ends the wizard.
    pub fn finish_execute(
        &mut self,
        id: RequestId,
        response: std::result::Result<ExecuteResult, ServiceError>,
    ) -> Result<()> {
        let Some(Call::Execute(request)) =
            self.take_pending(id, |c| matches!(c, Call::Execute(_)))
        else {
            return Err(WizardError::NotPending);
        };
        let result = response.map_err(|e| self.fail(StageKind::Preview, e))?;

        tracing::info!(
            children_created = result.children_created,
            children_updated = result.children_updated,
            parents_created = result.parents_created,
            parents_linked = result.parents_linked,
            errors = result.errors.len(),
            "import finished"
        );
        let report = ImportReport::from_result(&result);
        self.stage = Stage::Results(Box::new(ResultsStage {
            request,
            result,
            report,
        }));
        Ok(())
    }

    /// Returns to the previous stage, discarding what the current one owns.
    ///
    /// Going back from the preview keeps the mapping; the next preview
    /// starts a new reconciliation.
    pub fn back(&mut self) -> Result<StageKind> {
        if self.is_busy() {
            return Err(WizardError::Busy);
        }
        let previous = match std::mem::take(&mut self.stage) {
            Stage::Mapping(_) => Stage::Upload,
            Stage::Preview(stage) => {
                let PreviewStage {
                    file,
                    parsed,
                    mapping,
                    ..
                } = *stage;
                Stage::Mapping(Box::new(MappingStage {
                    file,
                    parsed,
                    mapping,
                }))
            }
            stage => {
                let kind = stage.kind();
                self.stage = stage;
                return Err(WizardError::CannotGoBack(kind));
            }
        };
        self.stage = previous;
        self.error = None;
        tracing::info!(stage = %self.stage_kind(), "navigated back");
        Ok(self.stage_kind())
    }

    /// Discards all wizard state. An answer to a request still in flight is
    /// refused by its `finish_*`, also after a new request has been started.
    pub fn cancel(&mut self) {
        tracing::info!(stage = %self.stage_kind(), "import cancelled");
        *self = Self {
            issued: self.issued,
            ..Self::with_skip_header(self.skip_header)
        };
    }

    /// Parses an upload through `service`.
    pub fn run_parse<S: ImportService>(
        &mut self,
        service: &S,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let (id, request) = self.begin_parse(file_name, bytes)?;
        let response = service.parse(&request.file_name, &request.bytes);
        self.finish_parse(id, response)
    }

    /// Requests the preview through `service`.
    pub fn run_preview<S: ImportService>(&mut self, service: &S) -> Result<()> {
        let (id, request) = self.begin_preview()?;
        let response = service.preview(&request);
        self.finish_preview(id, response)
    }

    /// Commits the reconciled rows through `service`.
    pub fn run_execute<S: ImportService>(&mut self, service: &S) -> Result<()> {
        let (id, request) = self.begin_execute()?;
        let response = service.execute(&request);
        self.finish_execute(id, response)
    }
}

#[cfg(test)]
mod tests {
    use kita_model::Separator;

    use super::*;

    fn parsed() -> ParsedFile {
        ParsedFile {
            headers: vec!["Nr".to_string(), "Vorname".to_string()],
            detected_separator: Separator::Semicolon,
            sample_rows: vec![vec!["1".to_string(), "Mia".to_string()]],
            total_rows: 1,
        }
    }

    #[test]
    fn second_begin_while_busy_is_refused() {
        let mut wizard = ImportWizard::new();
        let (id, _) = wizard
            .begin_parse("kinder.csv", b"Nr;Vorname\n1;Mia\n".to_vec())
            .unwrap();
        assert!(wizard.is_busy());
        assert_eq!(wizard.pending_request(), Some(id));
        assert_eq!(
            wizard.begin_parse("kinder.csv", Vec::new()),
            Err(WizardError::Busy)
        );
        assert_eq!(wizard.back(), Err(WizardError::Busy));

        wizard.finish_parse(id, Ok(parsed())).unwrap();
        assert!(!wizard.is_busy());
        assert_eq!(wizard.stage_kind(), StageKind::Mapping);
    }

    #[test]
    fn finish_without_begin_is_refused() {
        let mut wizard = ImportWizard::new();
        assert_eq!(
            wizard.finish_parse(RequestId(1), Ok(parsed())),
            Err(WizardError::NotPending)
        );
        assert_eq!(wizard.stage_kind(), StageKind::Upload);
    }

    #[test]
    fn answer_of_another_kind_leaves_request_pending() {
        let mut wizard = ImportWizard::new();
        let (id, _) = wizard.begin_parse("kinder.csv", b"Nr;Vorname".to_vec()).unwrap();
        assert_eq!(
            wizard.finish_execute(id, Ok(ExecuteResult::default())),
            Err(WizardError::NotPending)
        );
        assert_eq!(wizard.pending_request(), Some(id));
        wizard.finish_parse(id, Ok(parsed())).unwrap();
        assert_eq!(wizard.stage_kind(), StageKind::Mapping);
    }

    #[test]
    fn preview_request_carries_file_and_mapping() {
        let mut wizard = ImportWizard::with_skip_header(false);
        let (id, _) = wizard.begin_parse("kinder.csv", b"Nr;Vorname".to_vec()).unwrap();
        wizard.finish_parse(id, Ok(parsed())).unwrap();

        let (_, request) = wizard.begin_preview().unwrap();
        assert_eq!(request.file_content, "TnI7Vm9ybmFtZQ==");
        assert_eq!(request.separator, Separator::Semicolon);
        assert!(!request.skip_header);
        assert_eq!(request.mapping.len(), 2);
    }

    #[test]
    fn empty_header_row_stays_in_upload() {
        let mut wizard = ImportWizard::new();
        let (id, _) = wizard.begin_parse("leer.csv", b"\n".to_vec()).unwrap();
        let result = wizard.finish_parse(id, Ok(ParsedFile {
            headers: Vec::new(),
            ..parsed()
        }));
        assert_eq!(result, Err(WizardError::NoHeaders));
        assert_eq!(wizard.stage_kind(), StageKind::Upload);
        assert!(wizard.error().is_some());
    }

    #[test]
    fn cannot_go_back_from_upload() {
        let mut wizard = ImportWizard::new();
        assert_eq!(
            wizard.back(),
            Err(WizardError::CannotGoBack(StageKind::Upload))
        );
    }
}
