//! Common error infrastructure for mech-core.
//!
//! Domain-specific errors (e.g. [`crate::engine::AttachError`]) live next to the
//! operation they guard. This module provides the shared classification used by
//! callers to decide between re-prompting and aborting.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed after the user picks again
/// - **Validation**: the request itself is invalid and must change before retrying
/// - **Internal**: unexpected state inconsistency that points at a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Recoverable error - retry with a different selection.
    ///
    /// Examples: scale selection cancelled, out-of-range menu choice
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: parent not found, scale above the part maximum
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the session cannot continue.
    ///
    /// Examples: part ID space exhausted
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common trait for all mech-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings suitable for logs and test assertions
pub trait MechError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
