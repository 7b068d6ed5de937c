//! Values that can be tweened channel by channel.

use core::fmt::Debug;

use framekit_api_core::{Color, Vec2};

use crate::interp::{ease, InterpolationMode};

/// A value type whose channels are eased independently with one shared `t`.
pub trait Tweenable: Copy + Debug + PartialEq {
    fn tween(from: Self, to: Self, t: f32, mode: InterpolationMode) -> Self;
}

impl Tweenable for f32 {
    #[inline]
    fn tween(from: f32, to: f32, t: f32, mode: InterpolationMode) -> f32 {
        ease(mode, from, to, t)
    }
}

impl Tweenable for Vec2 {
    #[inline]
    fn tween(from: Vec2, to: Vec2, t: f32, mode: InterpolationMode) -> Vec2 {
        Vec2::new(ease(mode, from.x, to.x, t), ease(mode, from.y, to.y, t))
    }
}

impl Tweenable for Color {
    fn tween(from: Color, to: Color, t: f32, mode: InterpolationMode) -> Color {
        Color::rgba(
            ease(mode, from.r, to.r, t),
            ease(mode, from.g, to.g, t),
            ease(mode, from.b, to.b, t),
            ease(mode, from.a, to.a, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_channels_share_t() {
        let v = Vec2::tween(
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
            0.25,
            InterpolationMode::Linear,
        );
        assert_eq!(v, Vec2::new(2.5, 7.5));
    }

    #[test]
    fn color_endpoints_are_exact() {
        let a = Color::rgba(0.1, 0.2, 0.3, 0.4);
        let b = Color::rgba(0.9, 0.8, 0.7, 0.6);
        assert_eq!(Color::tween(a, b, 1.0, InterpolationMode::Bounce), b);
        assert_eq!(Color::tween(a, b, 0.0, InterpolationMode::Bounce), a);
    }
}
