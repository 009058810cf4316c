//! Import reconciliation workflow.
//!
//! Drives an upload through parse, column mapping, server-side preview and
//! commit. The backend is reached through the [`ImportService`] trait; this
//! crate owns everything the user decides in between: which rows are
//! imported, which duplicates are merged, which side of a field conflict
//! wins and whether parents are created or linked.

pub mod care_hours;
pub mod error;
pub mod reconcile;
pub mod report;
pub mod service;
pub mod wizard;

pub use care_hours::{DAILY_HOURS_THRESHOLD, DAYS_PER_WEEK, normalize_care_hours};
pub use error::{ReconcileError, Result, ServiceError, WizardError};
pub use reconcile::{
    Disposition, ParentChoice, Reconciliation, ReconcileSummary, Resolution, RowEdit, RowState,
    RowStatus,
};
pub use report::ImportReport;
pub use service::ImportService;
pub use wizard::{
    ImportWizard, MappingStage, ParseRequest, PreviewStage, RequestId, ResultsStage, Stage,
    StageKind, UploadedFile,
};
