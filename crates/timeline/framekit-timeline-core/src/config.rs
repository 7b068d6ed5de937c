//! Timeline tuning knobs.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Once the head has moved past this many records (and the timeline is
    /// not looped) fired records behind it are purged.
    pub skipped_record_threshold: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            skipped_record_threshold: 3,
        }
    }
}
