//! Error types raised by repository implementations.

use mech_core::{ErrorSeverity, MechError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("template repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("invalid template name '{0}'")]
    InvalidName(String),
}

impl MechError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidName(_) => ErrorSeverity::Validation,
            Self::Io(_) | Self::Json(_) => ErrorSeverity::Recoverable,
            Self::LockPoisoned => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Json(_) => "REPOSITORY_JSON",
            Self::InvalidName(_) => "REPOSITORY_INVALID_NAME",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
