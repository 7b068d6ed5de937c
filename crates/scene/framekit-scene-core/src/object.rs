//! DynamicObject: the mutable state every scene node carries.
//!
//! Each frame runs, in order: behaviours, property animators, the rate fields
//! (`*_shift`, accelerations) and finally momentum integration. Each phase can
//! be paused separately through [`PauseTarget`].

use bitflags::bitflags;
use framekit_api_core::{Color, FloatExt, Vec2};
use serde::{Deserialize, Serialize};

use crate::animators::ActiveAnimator;
use crate::behaviour::{BehaviourContext, Behaviours};
use crate::property::AnimatableProperty;
use crate::touch::Interaction;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PauseTarget: u32 {
        const MOMENTUM = 0x01;
        const TRANSFORMATION = 0x02;
        const BEHAVIOURS = 0x04;
        const SPRITE_ANIMATION = 0x10;
        const PROPERTY_ANIMATION = 0x20;
        const PHYSICS = Self::MOMENTUM.bits()
            | Self::TRANSFORMATION.bits()
            | Self::BEHAVIOURS.bits()
            | Self::PROPERTY_ANIMATION.bits();
        const ALL = Self::PHYSICS.bits() | Self::SPRITE_ANIMATION.bits();
    }
}

#[derive(Clone)]
pub struct DynamicObject {
    /// Offset from the parent node.
    pub position: Vec2,
    pub visible: bool,
    /// Velocity in units per second.
    pub momentum: Vec2,
    pub scale: f32,
    /// Per-axis scale; overrides `scale` when set.
    pub scale_vector: Option<Vec2>,
    /// Rotation in radians.
    pub angle: f32,
    pub tint: Color,

    pub scale_shift: f32,
    pub angle_shift: f32,
    pub transparency_shift: f32,
    /// Rate of change of speed.
    pub acceleration: f32,
    /// Rate of change of direction.
    pub angular_acceleration: f32,

    pub pause: PauseTarget,
    pub interaction: Interaction,

    pub(crate) fading_out: bool,
    pub(crate) animators: Vec<ActiveAnimator>,
}

impl Default for DynamicObject {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            visible: true,
            momentum: Vec2::ZERO,
            scale: 1.0,
            scale_vector: None,
            angle: 0.0,
            tint: Color::WHITE,
            scale_shift: 0.0,
            angle_shift: 0.0,
            transparency_shift: 0.0,
            acceleration: 0.0,
            angular_acceleration: 0.0,
            pause: PauseTarget::empty(),
            interaction: Interaction::default(),
            fading_out: false,
            animators: Vec::new(),
        }
    }
}

impl core::fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynamicObject")
            .field("position", &self.position)
            .field("momentum", &self.momentum)
            .field("scale", &self.scale)
            .field("angle", &self.angle)
            .field("tint", &self.tint)
            .field("pause", &self.pause)
            .field("fading_out", &self.fading_out)
            .field("animators", &self.animators.len())
            .finish()
    }
}

impl DynamicObject {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Alpha of the tint colour.
    pub fn transparency(&self) -> f32 {
        self.tint.a
    }

    /// Clamped to `0..=1`.
    pub fn set_transparency(&mut self, value: f32) {
        self.tint.a = value.clamp(0.0, 1.0);
    }

    pub fn speed(&self) -> f32 {
        self.momentum.length()
    }

    /// Keeps the heading; a stationary object starts moving along +x.
    pub fn set_speed(&mut self, speed: f32) {
        if self.momentum.is_almost_zero() {
            self.momentum = Vec2::new(speed, 0.0);
        } else {
            self.momentum = self.momentum.normalize_or_zero() * speed;
        }
    }

    /// Heading of the momentum in radians.
    pub fn direction(&self) -> f32 {
        self.momentum.angle()
    }

    pub fn set_direction(&mut self, angle: f32) {
        self.momentum = Vec2::from_polar(self.momentum.length(), angle);
    }

    pub fn move_at(&mut self, speed: f32, angle: f32) {
        self.momentum = Vec2::from_polar(speed, angle);
    }

    /// Turn towards `target`, both given in the same space as `from`.
    pub fn head_towards(&mut self, from: Vec2, target: Vec2) {
        self.set_direction((target - from).angle());
    }

    /// Keep the speed and point it at `point` in parent space.
    pub fn move_towards(&mut self, point: Vec2) {
        self.head_towards(self.position, point);
    }

    /// Zero momentum and cancel a position animation where it is.
    pub fn stop(&mut self) {
        self.momentum = Vec2::ZERO;
        self.stop_animating(AnimatableProperty::Position, false);
    }

    pub fn is_fading_out(&self) -> bool {
        self.fading_out
    }

    pub(crate) fn update(&mut self, behaviours: &mut Behaviours, ctx: &mut BehaviourContext<'_>) {
        if !self.pause.contains(PauseTarget::BEHAVIOURS) {
            behaviours.update_object_state(self, ctx);
        }
        if !self.pause.contains(PauseTarget::PROPERTY_ANIMATION) {
            let node = ctx.node();
            self.update_animators(node, ctx.frame());
        }

        let delta = ctx.delta();
        if !self.pause.contains(PauseTarget::TRANSFORMATION) {
            self.apply_shifts(delta);
        }
        if !self.pause.contains(PauseTarget::MOMENTUM) && !self.momentum.is_almost_zero() {
            self.position += self.momentum * delta;
        }
    }

    fn apply_shifts(&mut self, delta: f32) {
        if !self.scale_shift.is_almost_zero() {
            self.scale += delta * self.scale_shift;
            if let Some(v) = self.scale_vector.as_mut() {
                *v += Vec2::splat(delta * self.scale_shift);
            }
        }
        if !self.angle_shift.is_almost_zero() {
            self.angle += delta * self.angle_shift;
        }
        if !self.transparency_shift.is_almost_zero() {
            self.set_transparency(self.transparency() + delta * self.transparency_shift);
        }
        if !self.acceleration.is_almost_zero() {
            self.set_speed(self.speed() + delta * self.acceleration);
        }
        if !self.angular_acceleration.is_almost_zero() {
            self.set_direction(self.direction() + delta * self.angular_acceleration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn speed_on_stationary_object_points_right() {
        let mut obj = DynamicObject::default();
        obj.set_speed(5.0);
        assert_eq!(obj.momentum, Vec2::new(5.0, 0.0));
        obj.set_direction(FRAC_PI_2);
        assert_relative_eq!(obj.momentum.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(obj.momentum.y, 5.0, epsilon = 1e-5);
        assert_relative_eq!(obj.direction(), FRAC_PI_2, epsilon = 1e-5);
        obj.set_speed(2.0);
        assert_relative_eq!(obj.speed(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn transparency_is_clamped_alpha() {
        let mut obj = DynamicObject::default();
        obj.set_transparency(1.5);
        assert_eq!(obj.transparency(), 1.0);
        obj.set_transparency(-0.5);
        assert_eq!(obj.tint, Color::rgba(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn shifts_integrate_rates() {
        let mut obj = DynamicObject::default();
        obj.scale_shift = 1.0;
        obj.angle_shift = 2.0;
        obj.transparency_shift = -0.5;
        obj.apply_shifts(0.5);
        assert_relative_eq!(obj.scale, 1.5);
        assert_relative_eq!(obj.angle, 1.0);
        assert_relative_eq!(obj.transparency(), 0.75);
    }

    #[test]
    fn head_towards_sets_direction_only() {
        let mut obj = DynamicObject::default();
        obj.move_at(3.0, 0.0);
        obj.head_towards(Vec2::ZERO, Vec2::new(0.0, -10.0));
        assert_relative_eq!(obj.speed(), 3.0, epsilon = 1e-5);
        assert_relative_eq!(obj.momentum.y, -3.0, epsilon = 1e-5);
    }
}
