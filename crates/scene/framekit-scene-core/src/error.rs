//! Error types for scene graph operations

use framekit_animation_core::AnimationError;
use framekit_api_core::ValueKind;

use crate::ids::NodeId;
use crate::property::AnimatableProperty;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SceneError {
    /// Target value cannot be represented by the property
    #[error("Property {property:?} holds {expected:?} values, got {actual:?}")]
    PropertyKindMismatch {
        property: AnimatableProperty,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Custom properties can only be animated through a setter
    #[error("Custom properties need a setter to be animated")]
    CustomPropertyNeedsSetter,

    /// Curve motion needs an odd number of at least three control points
    #[error("Curve needs an odd number of at least 3 control points, got {points}")]
    InvalidCurve { points: usize },

    /// Node handle is stale or was never issued by this graph
    #[error("Unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// Children can only be attached to group nodes
    #[error("Node {id} is not a group")]
    NotAGroup { id: NodeId },

    /// Attaching would make a node its own ancestor
    #[error("Attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// Asset provider could not resolve a name
    #[error("Unknown asset: {name}")]
    UnknownAsset { name: String },

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

impl SceneError {
    pub fn category(&self) -> &'static str {
        match self {
            SceneError::PropertyKindMismatch { .. }
            | SceneError::CustomPropertyNeedsSetter
            | SceneError::Animation(_) => "animation",
            SceneError::InvalidCurve { .. } => "behaviour",
            SceneError::UnknownNode { .. }
            | SceneError::NotAGroup { .. }
            | SceneError::Cycle { .. } => "graph",
            SceneError::UnknownAsset { .. } => "asset",
        }
    }
}

pub type Result<T> = core::result::Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_errors_convert() {
        let e: SceneError = AnimationError::InvalidDuration { duration: -2.0 }.into();
        assert_eq!(e.category(), "animation");
        assert!(e.to_string().contains("-2"));
    }

    #[test]
    fn curve_error_reports_count() {
        let e = SceneError::InvalidCurve { points: 4 };
        assert_eq!(e.category(), "behaviour");
        assert!(e.to_string().contains("got 4"));
    }
}
