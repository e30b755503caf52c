//! Error types raised by the research and resource ledgers.

use mech_core::{ErrorSeverity, MechError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient gold: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),
}

impl MechError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds { .. } => ErrorSeverity::Validation,
            Self::Io(_) | Self::Json(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "LEDGER_INSUFFICIENT_FUNDS",
            Self::Io(_) => "LEDGER_IO",
            Self::Json(_) => "LEDGER_JSON",
        }
    }
}
