//! Error types for the import workflow.

use kita_map::MappingError;
use kita_model::ParentSlot;
use thiserror::Error;

use crate::reconcile::RowStatus;
use crate::wizard::StageKind;

/// A reconciliation operation was rejected. State is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("row {0} is not part of the preview")]
    UnknownRow(usize),

    #[error("row {index} cannot be selected for import (status: {status})")]
    NotSelectable { index: usize, status: RowStatus },

    #[error("row {index} cannot be merged (status: {status}, existing child known: {has_existing})")]
    NotMergeable {
        index: usize,
        status: RowStatus,
        has_existing: bool,
    },

    #[error("row {index} has no conflict on field '{field}'")]
    UnknownConflict { index: usize, field: String },

    #[error("row {index} has no parent {}", .slot.number())]
    NoParent { index: usize, slot: ParentSlot },

    #[error("parent {} of row {index} has no stored match with id '{parent_id}'", .slot.number())]
    UnknownParentMatch {
        index: usize,
        slot: ParentSlot,
        parent_id: String,
    },

    #[error("no rows selected or merged")]
    NothingToImport,
}

/// Failure of a call to the import backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never got a response.
    #[error("import service unreachable: {0}")]
    Transport(String),

    /// The backend answered with an error status.
    #[error("import service error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response from import service: {0}")]
    InvalidResponse(String),
}

/// A wizard transition was rejected or its remote call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("a request is already in progress")]
    Busy,

    #[error("no request is pending")]
    NotPending,

    #[error("action not available in the {actual} stage (requires {expected})")]
    WrongStage {
        expected: StageKind,
        actual: StageKind,
    },

    #[error("cannot go back from the {0} stage")]
    CannotGoBack(StageKind),

    #[error("uploaded file has no header row")]
    NoHeaders,

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type Result<T> = std::result::Result<T, WizardError>;
