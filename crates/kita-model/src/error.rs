use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown target field: {0}")]
    UnknownField(String),
    #[error("invalid parent slot: {0} (expected 1 or 2)")]
    InvalidParentSlot(u8),
    #[error("unsupported separator: {0:?}")]
    InvalidSeparator(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
