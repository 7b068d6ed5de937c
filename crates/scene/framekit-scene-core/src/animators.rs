//! Property animations attached to a [`DynamicObject`].
//!
//! At most one animator runs per built-in property slot. Starting a new one
//! finishes the previous animator first. Custom animators carry their own
//! setter and are never deduplicated.

use std::rc::Rc;

use framekit_animation_core::{InterpolationMode, ValueAnimator};
use framekit_api_core::{AnimValue, FloatExt, Vec2};
use log::trace;

use crate::context::FrameContext;
use crate::deferred::DeferredAction;
use crate::error::{Result, SceneError};
use crate::ids::NodeId;
use crate::object::{DynamicObject, PauseTarget};
use crate::property::{AnimatableProperty, CustomSetter};

#[derive(Clone)]
pub(crate) struct ActiveAnimator {
    property: AnimatableProperty,
    setter: Option<CustomSetter>,
    animator: ValueAnimator,
}

impl DynamicObject {
    /// Animate a built-in property from its current value to `value`.
    pub fn animate_property(
        &mut self,
        property: AnimatableProperty,
        value: impl Into<AnimValue>,
        duration: f32,
        mode: InterpolationMode,
    ) -> Result<()> {
        self.start_animation(property, value.into(), duration, mode, false)
    }

    /// Like [`Self::animate_property`], then animate back to the start value.
    pub fn animate_property_and_back(
        &mut self,
        property: AnimatableProperty,
        value: impl Into<AnimValue>,
        duration: f32,
        mode: InterpolationMode,
    ) -> Result<()> {
        self.start_animation(property, value.into(), duration, mode, true)
    }

    fn start_animation(
        &mut self,
        property: AnimatableProperty,
        value: AnimValue,
        duration: f32,
        mode: InterpolationMode,
        animate_back: bool,
    ) -> Result<()> {
        property.check(&value)?;
        self.stop_animating(property, true);
        let initial = self
            .property(property)
            .ok_or(SceneError::CustomPropertyNeedsSetter)?;
        let animator =
            ValueAnimator::new(initial, value, duration, mode)?.with_animate_back(animate_back);
        self.animators.push(ActiveAnimator {
            property,
            setter: None,
            animator,
        });
        Ok(())
    }

    /// Animate an arbitrary scalar through `setter`.
    pub fn animate_custom<F>(
        &mut self,
        setter: F,
        from: f32,
        to: f32,
        duration: f32,
        mode: InterpolationMode,
        animate_back: bool,
    ) -> Result<()>
    where
        F: Fn(&mut DynamicObject, f32) + 'static,
    {
        self.push_custom(Rc::new(setter), from, to, duration, mode, animate_back)
    }

    pub(crate) fn push_custom(
        &mut self,
        setter: CustomSetter,
        from: f32,
        to: f32,
        duration: f32,
        mode: InterpolationMode,
        animate_back: bool,
    ) -> Result<()> {
        let animator = ValueAnimator::new(from.into(), to.into(), duration, mode)?
            .with_animate_back(animate_back);
        self.animators.push(ActiveAnimator {
            property: AnimatableProperty::Custom,
            setter: Some(setter),
            animator,
        });
        Ok(())
    }

    /// Glide to `point` (parent space) over `duration`.
    pub fn move_to_point(&mut self, point: Vec2, duration: f32, mode: InterpolationMode) -> Result<()> {
        self.animate_property(AnimatableProperty::Position, point, duration, mode)
    }

    /// Custom animations cannot be looked up and always report `false`.
    pub fn is_animating(&self, property: AnimatableProperty) -> bool {
        self.find_animator(property).is_some()
    }

    pub fn pause_animating(&mut self, property: AnimatableProperty, pause: bool) {
        if let Some(idx) = self.find_animator(property) {
            self.animators[idx].animator.set_paused(pause);
        }
    }

    pub fn pause_all_animations(&mut self, pause: bool) {
        self.pause.set(PauseTarget::PROPERTY_ANIMATION, pause);
    }

    /// Remove the animator for `property`, applying its final value if `finish`.
    pub fn stop_animating(&mut self, property: AnimatableProperty, finish: bool) {
        let Some(idx) = self.find_animator(property) else {
            return;
        };
        let mut active = self.animators.remove(idx);
        if finish {
            self.finish(&mut active);
        }
    }

    pub fn stop_animating_all(&mut self, finish: bool) {
        let list = core::mem::take(&mut self.animators);
        if finish {
            for mut active in list {
                self.finish(&mut active);
            }
        }
    }

    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }

    fn find_animator(&self, property: AnimatableProperty) -> Option<usize> {
        if property == AnimatableProperty::Custom {
            return None;
        }
        self.animators.iter().position(|a| a.property == property)
    }

    fn finish(&mut self, active: &mut ActiveAnimator) {
        let Some(value) = active.animator.skip() else {
            return;
        };
        match (active.property, value) {
            (AnimatableProperty::Position, AnimValue::Vec2(target)) => {
                self.position = target;
                self.momentum = Vec2::ZERO;
            }
            (AnimatableProperty::Custom, AnimValue::Float(v)) => {
                if let Some(setter) = active.setter.clone() {
                    setter(self, v);
                }
            }
            (property, value) => self.write_property(property, value),
        }
    }

    fn apply_step(&mut self, active: &ActiveAnimator, value: AnimValue, delta: f32) {
        match (active.property, value) {
            // Position moves through momentum so it integrates like physics.
            (AnimatableProperty::Position, AnimValue::Vec2(target)) => {
                if delta.is_almost_zero() {
                    self.position = target;
                } else {
                    self.momentum = (target - self.position) / delta;
                }
            }
            (AnimatableProperty::Custom, AnimValue::Float(v)) => {
                if let Some(setter) = active.setter.clone() {
                    setter(self, v);
                }
            }
            (property, value) => self.write_property(property, value),
        }
    }

    pub(crate) fn update_animators(&mut self, node: NodeId, frame: &mut FrameContext) {
        if self.animators.is_empty() {
            return;
        }
        let delta = frame.delta();
        let mut list = core::mem::take(&mut self.animators);
        list.retain_mut(|active| {
            if active.animator.is_paused() {
                return true;
            }
            let Some(step) = active.animator.advance(delta) else {
                return false;
            };
            self.apply_step(active, step.value, delta);
            if step.completed {
                trace!("{}: {:?} animation finished", node, active.property);
                if active.property == AnimatableProperty::Position {
                    frame.defer(DeferredAction::SetMomentum {
                        node,
                        momentum: Vec2::ZERO,
                    });
                }
                if active.animator.wants_revert() {
                    frame.defer(revert_action(node, active));
                }
            }
            !active.animator.is_finished()
        });
        // anything started by a setter while we were iterating goes after
        list.append(&mut self.animators);
        self.animators = list;
    }
}

fn revert_action(node: NodeId, active: &ActiveAnimator) -> DeferredAction {
    let a = &active.animator;
    match (&active.setter, a.initial(), a.desired()) {
        (Some(setter), AnimValue::Float(from), AnimValue::Float(to)) => {
            DeferredAction::AnimateCustom {
                node,
                setter: setter.clone(),
                from: to,
                to: from,
                duration: a.duration(),
                mode: a.mode(),
            }
        }
        (_, initial, _) => DeferredAction::Animate {
            node,
            property: active.property,
            value: initial,
            duration: a.duration(),
            mode: a.mode(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_api_core::Color;

    fn ctx(delta: f32) -> FrameContext {
        let mut ctx = FrameContext::with_seed(Vec2::new(100.0, 100.0), 0);
        ctx.set_delta(delta);
        ctx
    }

    fn node() -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    #[test]
    fn same_slot_replaces_and_finishes_previous() {
        let mut obj = DynamicObject::default();
        obj.animate_property(AnimatableProperty::Scale, 3.0f32, 1.0, InterpolationMode::Linear)
            .unwrap();
        obj.animate_property(AnimatableProperty::Scale, 0.5f32, 1.0, InterpolationMode::Linear)
            .unwrap();
        assert_eq!(obj.animator_count(), 1);
        // the first animation was completed before the second captured its start
        assert_eq!(obj.scale, 3.0);
    }

    #[test]
    fn custom_animators_stack() {
        let mut obj = DynamicObject::default();
        for _ in 0..2 {
            obj.animate_custom(|o, v| o.angle = v, 0.0, 1.0, 1.0, InterpolationMode::Linear, false)
                .unwrap();
        }
        assert_eq!(obj.animator_count(), 2);
        assert!(!obj.is_animating(AnimatableProperty::Custom));
    }

    #[test]
    fn completion_defers_momentum_reset_and_revert() {
        let mut obj = DynamicObject::default();
        let mut frame = ctx(0.5);
        obj.animate_property_and_back(
            AnimatableProperty::Position,
            Vec2::new(10.0, 0.0),
            0.5,
            InterpolationMode::Linear,
        )
        .unwrap();
        obj.update_animators(node(), &mut frame);
        assert_eq!(obj.momentum, Vec2::new(20.0, 0.0));
        assert_eq!(obj.animator_count(), 0);
        let labels: Vec<_> = frame.take_deferred().iter().map(|a| a.label()).collect();
        assert_eq!(labels, vec!["set-momentum", "animate"]);
    }

    #[test]
    fn paused_animator_is_kept() {
        let mut obj = DynamicObject::default();
        let mut frame = ctx(0.1);
        obj.animate_property(AnimatableProperty::Color, Color::BLACK, 1.0, InterpolationMode::Linear)
            .unwrap();
        obj.pause_animating(AnimatableProperty::Color, true);
        obj.update_animators(node(), &mut frame);
        assert_eq!(obj.tint, Color::WHITE);
        assert!(obj.is_animating(AnimatableProperty::Color));
    }

    #[test]
    fn stop_without_finish_leaves_value() {
        let mut obj = DynamicObject::default();
        let mut frame = ctx(0.25);
        obj.animate_property(AnimatableProperty::Angle, 4.0f32, 1.0, InterpolationMode::Linear)
            .unwrap();
        obj.update_animators(node(), &mut frame);
        obj.stop_animating(AnimatableProperty::Angle, false);
        assert_eq!(obj.angle, 1.0);
        assert!(!obj.is_animating(AnimatableProperty::Angle));
    }

    #[test]
    fn skipping_position_lands_exactly() {
        let mut obj = DynamicObject::default();
        obj.move_to_point(Vec2::new(7.0, 3.0), 2.0, InterpolationMode::EaseInSoft)
            .unwrap();
        obj.momentum = Vec2::new(1.0, 1.0);
        obj.stop_animating_all(true);
        assert_eq!(obj.position, Vec2::new(7.0, 3.0));
        assert_eq!(obj.momentum, Vec2::ZERO);
    }
}
