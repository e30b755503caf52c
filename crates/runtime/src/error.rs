//! Unified error type surfaced by the workshop API.
//!
//! Wraps failures from composition, repositories and ledgers so front-ends
//! can bubble them up with consistent context.
use mech_core::{AttachError, ErrorSeverity, MechError};
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Attach(#[from] AttachError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("template '{name}' not found")]
    TemplateNotFound { name: String },
}

impl MechError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Attach(e) => e.severity(),
            Self::Repository(e) => e.severity(),
            Self::Ledger(e) => e.severity(),
            Self::TemplateNotFound { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Attach(e) => e.error_code(),
            Self::Repository(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
            Self::TemplateNotFound { .. } => "RUNTIME_TEMPLATE_NOT_FOUND",
        }
    }
}
