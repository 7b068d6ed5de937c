//! Error types for property animation

use framekit_api_core::ValueKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    /// Duration is negative or not finite
    #[error("Invalid animation duration: {duration}")]
    InvalidDuration { duration: f32 },

    /// Initial and desired values are of different kinds
    #[error("Value kind mismatch: expected {expected:?}, got {actual:?}")]
    ValueKindMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },
}

impl AnimationError {
    pub fn category(&self) -> &'static str {
        match self {
            AnimationError::InvalidDuration { .. } => "timing",
            AnimationError::ValueKindMismatch { .. } => "value",
        }
    }
}

pub type Result<T> = core::result::Result<T, AnimationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_category() {
        let e = AnimationError::InvalidDuration { duration: -1.0 };
        assert_eq!(e.to_string(), "Invalid animation duration: -1");
        assert_eq!(e.category(), "timing");

        let e = AnimationError::ValueKindMismatch {
            expected: ValueKind::Vec2,
            actual: ValueKind::Float,
        };
        assert!(e.to_string().contains("Vec2"));
        assert_eq!(e.category(), "value");
    }
}
