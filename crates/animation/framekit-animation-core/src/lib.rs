//! framekit-animation-core
//!
//! Stateless easing library plus the tween state machines that drive property
//! animation. Nothing here knows about scene nodes: callers own the property
//! and write back whatever value an animator yields each tick.

pub mod any;
pub mod animator;
pub mod error;
pub mod interp;
pub mod tween;
pub mod tweener;

pub use any::{AnyStep, ValueAnimator};
pub use animator::{PropertyAnimator, Step};
pub use error::{AnimationError, Result};
pub use interp::{ease, easing_for, EasingFn, InterpolationMode};
pub use tween::Tweenable;
pub use tweener::Tweener;
