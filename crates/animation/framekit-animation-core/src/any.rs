//! ValueAnimator: a PropertyAnimator over any [`AnimValue`] kind, so animators
//! for scalar, vector and colour slots can live in one list.

use framekit_api_core::{AnimValue, Color, Vec2, ValueKind};

use crate::animator::{PropertyAnimator, Step};
use crate::error::{AnimationError, Result};
use crate::interp::InterpolationMode;

#[derive(Clone, Debug)]
pub enum ValueAnimator {
    Float(PropertyAnimator<f32>),
    Vec2(PropertyAnimator<Vec2>),
    Color(PropertyAnimator<Color>),
}

/// Type-erased [`Step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnyStep {
    pub value: AnimValue,
    pub completed: bool,
}

impl<T: Into<AnimValue>> From<Step<T>> for AnyStep {
    fn from(s: Step<T>) -> Self {
        AnyStep {
            value: s.value.into(),
            completed: s.completed,
        }
    }
}

impl ValueAnimator {
    /// Build an animator from two values of the same kind.
    pub fn new(
        initial: AnimValue,
        desired: AnimValue,
        duration: f32,
        mode: InterpolationMode,
    ) -> Result<Self> {
        Ok(match (initial, desired) {
            (AnimValue::Float(a), AnimValue::Float(b)) => {
                ValueAnimator::Float(PropertyAnimator::new(a, b, duration, mode)?)
            }
            (AnimValue::Vec2(a), AnimValue::Vec2(b)) => {
                ValueAnimator::Vec2(PropertyAnimator::new(a, b, duration, mode)?)
            }
            (AnimValue::Color(a), AnimValue::Color(b)) => {
                ValueAnimator::Color(PropertyAnimator::new(a, b, duration, mode)?)
            }
            (a, b) => {
                return Err(AnimationError::ValueKindMismatch {
                    expected: a.kind(),
                    actual: b.kind(),
                })
            }
        })
    }

    pub fn with_animate_back(self, on: bool) -> Self {
        match self {
            ValueAnimator::Float(a) => ValueAnimator::Float(a.with_animate_back(on)),
            ValueAnimator::Vec2(a) => ValueAnimator::Vec2(a.with_animate_back(on)),
            ValueAnimator::Color(a) => ValueAnimator::Color(a.with_animate_back(on)),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ValueAnimator::Float(_) => ValueKind::Float,
            ValueAnimator::Vec2(_) => ValueKind::Vec2,
            ValueAnimator::Color(_) => ValueKind::Color,
        }
    }

    pub fn advance(&mut self, delta: f32) -> Option<AnyStep> {
        match self {
            ValueAnimator::Float(a) => a.advance(delta).map(Into::into),
            ValueAnimator::Vec2(a) => a.advance(delta).map(Into::into),
            ValueAnimator::Color(a) => a.advance(delta).map(Into::into),
        }
    }

    pub fn skip(&mut self) -> Option<AnimValue> {
        match self {
            ValueAnimator::Float(a) => a.skip().map(Into::into),
            ValueAnimator::Vec2(a) => a.skip().map(Into::into),
            ValueAnimator::Color(a) => a.skip().map(Into::into),
        }
    }

    pub fn initial(&self) -> AnimValue {
        match self {
            ValueAnimator::Float(a) => a.initial().into(),
            ValueAnimator::Vec2(a) => a.initial().into(),
            ValueAnimator::Color(a) => a.initial().into(),
        }
    }

    pub fn desired(&self) -> AnimValue {
        match self {
            ValueAnimator::Float(a) => a.desired().into(),
            ValueAnimator::Vec2(a) => a.desired().into(),
            ValueAnimator::Color(a) => a.desired().into(),
        }
    }

    pub fn duration(&self) -> f32 {
        match self {
            ValueAnimator::Float(a) => a.duration(),
            ValueAnimator::Vec2(a) => a.duration(),
            ValueAnimator::Color(a) => a.duration(),
        }
    }

    pub fn mode(&self) -> InterpolationMode {
        match self {
            ValueAnimator::Float(a) => a.mode(),
            ValueAnimator::Vec2(a) => a.mode(),
            ValueAnimator::Color(a) => a.mode(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            ValueAnimator::Float(a) => a.is_finished(),
            ValueAnimator::Vec2(a) => a.is_finished(),
            ValueAnimator::Color(a) => a.is_finished(),
        }
    }

    pub fn is_paused(&self) -> bool {
        match self {
            ValueAnimator::Float(a) => a.is_paused(),
            ValueAnimator::Vec2(a) => a.is_paused(),
            ValueAnimator::Color(a) => a.is_paused(),
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        match self {
            ValueAnimator::Float(a) => a.set_paused(paused),
            ValueAnimator::Vec2(a) => a.set_paused(paused),
            ValueAnimator::Color(a) => a.set_paused(paused),
        }
    }

    pub fn wants_revert(&self) -> bool {
        match self {
            ValueAnimator::Float(a) => a.wants_revert(),
            ValueAnimator::Vec2(a) => a.wants_revert(),
            ValueAnimator::Color(a) => a.wants_revert(),
        }
    }
}
