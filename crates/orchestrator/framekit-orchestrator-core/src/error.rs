//! Error types for the frame scheduler

use framekit_scene_core::SceneError;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// Update or draw was called with no current scene
    #[error("No active scene")]
    NoActiveScene,

    #[error("Scene '{name}' already exists")]
    DuplicateScene { name: String },

    #[error("Unknown scene '{name}'")]
    UnknownScene { name: String },

    #[error("Invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl EngineError {
    pub fn category(&self) -> &'static str {
        match self {
            EngineError::NoActiveScene
            | EngineError::DuplicateScene { .. }
            | EngineError::UnknownScene { .. }
            | EngineError::Config(_) => "configuration",
            EngineError::Scene(e) => e.category(),
        }
    }
}

pub type Result<T> = core::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_scene_core::SceneGraph;

    #[test]
    fn scene_errors_keep_their_category() {
        let id = SceneGraph::new().root();
        let e: EngineError = SceneError::NotAGroup { id }.into();
        assert_eq!(e.category(), "graph");
        assert_eq!(EngineError::NoActiveScene.category(), "configuration");
    }
}
