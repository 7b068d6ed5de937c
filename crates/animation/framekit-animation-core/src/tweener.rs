//! Standalone scalar tween for code that wants an eased value without binding
//! it to an object property.

use crate::interp::{ease, InterpolationMode};

#[derive(Clone, Debug)]
pub struct Tweener {
    from: f32,
    to: f32,
    time: f32,
    elapsed: f32,
    mode: InterpolationMode,
}

impl Tweener {
    pub fn new(from: f32, to: f32, time: f32, mode: InterpolationMode) -> Self {
        Self {
            from,
            to,
            time: time.max(0.0),
            elapsed: 0.0,
            mode,
        }
    }

    pub fn update(&mut self, delta: f32) {
        if !self.is_finished() {
            self.elapsed += delta;
        }
    }

    pub fn value(&self) -> f32 {
        let t = if self.time > 0.0 {
            self.elapsed / self.time
        } else {
            1.0
        };
        ease(self.mode, self.from, self.to, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.time
    }
}
