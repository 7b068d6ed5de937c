//! Engine configuration.

use framekit_api_core::Vec2;
use framekit_timeline_core::TimelineConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical screen size in pixels.
    pub screen_size: Vec2,
    pub timeline: TimelineConfig,
    /// Fixed seed for behaviour randomness. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    pub fps_logging: bool,
    /// Frame rate under which the FPS report is logged as a warning.
    pub fps_warn_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(800.0, 480.0),
            timeline: TimelineConfig::default(),
            rng_seed: None,
            fps_logging: false,
            fps_warn_threshold: 40.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_screen_size(mut self, size: Vec2) -> Self {
        self.screen_size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "rng_seed": 9, "timeline": {} }"#).unwrap();
        assert_eq!(cfg.rng_seed, Some(9));
        assert_eq!(cfg.timeline.skipped_record_threshold, 3);
        assert_eq!(cfg.fps_warn_threshold, 40.0);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = EngineConfig::from_json("{ screen_size: 3 }").unwrap_err();
        assert_eq!(err.category(), "configuration");
    }
}
