//! Error types for the attach pipeline.

use crate::error::{ErrorSeverity, MechError};
use crate::scale::ScaleLevel;
use crate::state::PartId;

/// Reasons an attach request is rejected.
///
/// Every variant leaves the part tree and the ID counter untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("parent part {parent} not found")]
    ParentNotFound { parent: PartId },

    #[error("no valid scale selected for '{part}'")]
    InvalidScaleSelection { part: String },

    #[error("scale {scale} exceeds parent scale {parent_scale}")]
    ScaleExceedsParent {
        scale: ScaleLevel,
        parent_scale: ScaleLevel,
    },

    #[error("scale {scale} is below the minimum level {min_level}")]
    ScaleBelowMinimum { scale: ScaleLevel, min_level: u8 },

    #[error("scale {scale} is above the maximum level {max_level}")]
    ScaleAboveMaximum { scale: ScaleLevel, max_level: u8 },

    #[error("'{part}' cannot be placed at the root: a frame is already there")]
    CategoryNotAllowedAtRoot { part: String },

    #[error("'{part}' has not been researched")]
    PartNotResearched { part: String },

    #[error("part ID space exhausted (last: {last})")]
    PartIdOverflow { last: u32 },
}

impl MechError for AttachError {
    fn severity(&self) -> ErrorSeverity {
        use AttachError::*;
        match self {
            // The user can simply pick again
            InvalidScaleSelection { .. } => ErrorSeverity::Recoverable,

            ParentNotFound { .. }
            | ScaleExceedsParent { .. }
            | ScaleBelowMinimum { .. }
            | ScaleAboveMaximum { .. }
            | CategoryNotAllowedAtRoot { .. }
            | PartNotResearched { .. } => ErrorSeverity::Validation,

            PartIdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use AttachError::*;
        match self {
            ParentNotFound { .. } => "ATTACH_PARENT_NOT_FOUND",
            InvalidScaleSelection { .. } => "ATTACH_INVALID_SCALE_SELECTION",
            ScaleExceedsParent { .. } => "ATTACH_SCALE_EXCEEDS_PARENT",
            ScaleBelowMinimum { .. } => "ATTACH_SCALE_BELOW_MINIMUM",
            ScaleAboveMaximum { .. } => "ATTACH_SCALE_ABOVE_MAXIMUM",
            CategoryNotAllowedAtRoot { .. } => "ATTACH_CATEGORY_NOT_ALLOWED_AT_ROOT",
            PartNotResearched { .. } => "ATTACH_PART_NOT_RESEARCHED",
            PartIdOverflow { .. } => "ATTACH_PART_ID_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_recoverable_but_overflow_is_not() {
        let cancelled = AttachError::InvalidScaleSelection {
            part: "Gun".to_string(),
        };
        assert_eq!(cancelled.severity(), ErrorSeverity::Recoverable);
        assert_eq!(cancelled.error_code(), "ATTACH_INVALID_SCALE_SELECTION");

        let too_big = AttachError::ScaleAboveMaximum {
            scale: ScaleLevel::House,
            max_level: 2,
        };
        assert!(too_big.severity().is_recoverable());
        assert_eq!(
            too_big.to_string(),
            "scale House(3) is above the maximum level 2"
        );

        let overflow = AttachError::PartIdOverflow { last: u32::MAX };
        assert!(!overflow.severity().is_recoverable());
    }
}
