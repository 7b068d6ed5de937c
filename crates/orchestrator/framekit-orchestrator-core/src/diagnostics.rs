use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Frames-per-second counter, reported once per second of accumulated delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FpsCounter {
    pub enabled: bool,
    pub warn_below: f32,
    frames: u32,
    elapsed: f32,
    last: Option<f32>,
}

impl Default for FpsCounter {
    fn default() -> Self {
        FpsCounter::new(true, 40.0)
    }
}

impl FpsCounter {
    pub fn new(enabled: bool, warn_below: f32) -> Self {
        Self {
            enabled,
            warn_below,
            frames: 0,
            elapsed: 0.0,
            last: None,
        }
    }

    /// Count one frame. Returns the rate when a full second has gone by.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;
        if self.elapsed < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        self.last = Some(fps);
        if self.enabled {
            if fps < self.warn_below {
                warn!("fps: {:.1} (below {:.0})", fps, self.warn_below);
            } else {
                debug!("fps: {:.1}", fps);
            }
        }
        Some(fps)
    }

    /// Rate from the last completed second.
    pub fn last(&self) -> Option<f32> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reports_once_per_second() {
        let mut fps = FpsCounter::new(false, 40.0);
        let reports: Vec<_> = (0..20).filter_map(|_| fps.tick(0.125)).collect();
        assert_eq!(reports.len(), 2);
        assert_relative_eq!(reports[0], 8.0);
        assert!(fps.last().is_some());
    }

    #[test]
    fn nothing_before_a_second() {
        let mut fps = FpsCounter::default();
        assert_eq!(fps.tick(0.5), None);
        assert_eq!(fps.last(), None);
    }
}
