//! PropertyAnimator<T>: a single tween from an initial to a desired value.
//!
//! The animator does not hold a reference to the property it drives. Each
//! [`PropertyAnimator::advance`] returns the value to write, and the caller
//! applies it. This keeps animators storable next to the object they animate.

use log::trace;

use crate::error::{AnimationError, Result};
use crate::interp::InterpolationMode;
use crate::tween::Tweenable;

/// Value produced by one animator tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step<T> {
    pub value: T,
    /// True only on the tick that completed the animation.
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct PropertyAnimator<T> {
    initial: T,
    desired: T,
    duration: f32,
    elapsed: f32,
    mode: InterpolationMode,
    animate_back: bool,
    paused: bool,
    finished: bool,
}

impl<T: Tweenable> PropertyAnimator<T> {
    /// `initial` is the property's current value at the time the animation starts.
    pub fn new(initial: T, desired: T, duration: f32, mode: InterpolationMode) -> Result<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(AnimationError::InvalidDuration { duration });
        }
        Ok(Self {
            initial,
            desired,
            duration,
            elapsed: 0.0,
            mode,
            animate_back: false,
            paused: false,
            finished: false,
        })
    }

    pub fn with_animate_back(mut self, animate_back: bool) -> Self {
        self.animate_back = animate_back;
        self
    }

    pub fn initial(&self) -> T {
        self.initial
    }

    pub fn desired(&self) -> T {
        self.desired
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    pub fn animate_back(&self) -> bool {
        self.animate_back
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Normalized progress in `0..=1`. A zero duration counts as complete.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Value at the current progress.
    pub fn value(&self) -> T {
        T::tween(self.initial, self.desired, self.progress(), self.mode)
    }

    /// Advance by `delta` seconds and return the value to write.
    ///
    /// Returns `None` once finished, so post-completion ticks never touch the
    /// property. A paused animator also returns `None` and keeps its elapsed
    /// time. The completing tick returns the exact final value.
    pub fn advance(&mut self, delta: f32) -> Option<Step<T>> {
        if self.finished || self.paused {
            return None;
        }
        self.elapsed += delta.max(0.0);
        let completed = self.elapsed >= self.duration;
        if completed {
            self.elapsed = self.duration;
            self.finished = true;
            trace!("animator completed after {}s ({:?})", self.duration, self.mode);
        }
        Some(Step {
            value: self.value(),
            completed,
        })
    }

    /// Force completion and return the value the property should end with.
    ///
    /// With animate-back set the round trip nets out, so the initial value is
    /// returned. Returns `None` if the animator already finished.
    pub fn skip(&mut self) -> Option<T> {
        if self.finished {
            return None;
        }
        self.elapsed = self.duration;
        self.finished = true;
        Some(if self.animate_back || self.mode.is_pulse() {
            self.initial
        } else {
            self.desired
        })
    }

    /// Whether completing this animator should start a reverse animation.
    /// Pulse modes already return to their start, so they never revert.
    pub fn wants_revert(&self) -> bool {
        self.animate_back && !self.mode.is_pulse()
    }

    /// Reverse animation from the desired value back to the initial one.
    pub fn reversed(&self) -> PropertyAnimator<T> {
        PropertyAnimator {
            initial: self.desired,
            desired: self.initial,
            duration: self.duration,
            elapsed: 0.0,
            mode: self.mode,
            animate_back: false,
            paused: false,
            finished: false,
        }
    }
}
