//! Appear and disappear effects.

use framekit_animation_core::InterpolationMode;
use framekit_api_core::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::object::DynamicObject;
use crate::property::AnimatableProperty;

use super::{ActivationContext, Behaviour, BehaviourContext, FadeOutHook};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeEffect {
    /// Transparency only.
    #[default]
    Fade,
    /// Scale only, from or to zero.
    Zoom,
    /// Transparency plus scale from or to zero.
    ZoomAndFade,
    /// Transparency plus scale from or to double size.
    InverseZoomAndFade,
}

impl FadeEffect {
    fn fades(self) -> bool {
        !matches!(self, FadeEffect::Zoom)
    }

    /// Scale at the invisible end of the effect.
    fn hidden_scale(self) -> Option<f32> {
        match self {
            FadeEffect::Fade => None,
            FadeEffect::Zoom | FadeEffect::ZoomAndFade => Some(0.0),
            FadeEffect::InverseZoomAndFade => Some(2.0),
        }
    }
}

fn animate(obj: &mut DynamicObject, property: AnimatableProperty, value: f32, time: f32, mode: InterpolationMode) {
    let result = match (property, obj.scale_vector) {
        (AnimatableProperty::Scale, Some(_)) => {
            obj.animate_property(AnimatableProperty::ScaleVector, Vec2::splat(value), time, mode)
        }
        _ => obj.animate_property(property, value, time, mode),
    };
    if let Err(err) = result {
        warn!("fade animation not started: {}", err);
    }
}

/// Brings the object in from its hidden state, then removes itself.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeIn {
    time: f32,
    effect: FadeEffect,
    mode: InterpolationMode,
    started: bool,
}

impl FadeIn {
    pub fn new(time: f32, effect: FadeEffect) -> Self {
        Self {
            time: time.max(0.0),
            effect,
            mode: InterpolationMode::Linear,
            started: false,
        }
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Behaviour for FadeIn {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        if self.started {
            return;
        }
        self.started = true;

        if self.effect.fades() {
            let alpha = obj.transparency();
            obj.set_transparency(0.0);
            animate(obj, AnimatableProperty::Transparency, alpha, self.time, self.mode);
        }
        if let Some(hidden) = self.effect.hidden_scale() {
            let scale = obj.scale;
            let vector = obj.scale_vector;
            obj.scale = hidden;
            obj.scale_vector = vector.map(|_| Vec2::splat(hidden));
            match vector {
                Some(v) => {
                    if let Err(err) =
                        obj.animate_property(AnimatableProperty::ScaleVector, v, self.time, self.mode)
                    {
                        warn!("fade animation not started: {}", err);
                    }
                }
                None => animate(obj, AnimatableProperty::Scale, scale, self.time, self.mode),
            }
        }
        ctx.remove_behaviour::<Self>();
    }
}

/// Runs the effect in reverse when the object is removed. The object is
/// destroyed once the effect time has passed.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeOut {
    time: f32,
    effect: FadeEffect,
    mode: InterpolationMode,
    elapsed: Option<f32>,
    started: bool,
}

impl FadeOut {
    pub fn new(time: f32, effect: FadeEffect) -> Self {
        Self {
            time: time.max(0.0),
            effect,
            mode: InterpolationMode::Linear,
            elapsed: None,
            started: false,
        }
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }
}

impl Behaviour for FadeOut {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        let Some(elapsed) = self.elapsed.as_mut() else {
            return;
        };
        *elapsed += ctx.delta();
        if self.started {
            return;
        }
        self.started = true;
        if self.effect.fades() {
            animate(obj, AnimatableProperty::Transparency, 0.0, self.time, self.mode);
        }
        if let Some(hidden) = self.effect.hidden_scale() {
            animate(obj, AnimatableProperty::Scale, hidden, self.time, self.mode);
        }
    }

    fn fade_out(&mut self) -> Option<&mut dyn FadeOutHook> {
        Some(self)
    }
}

impl FadeOutHook for FadeOut {
    fn activate(&mut self, _obj: &mut DynamicObject, _ctx: &mut ActivationContext<'_>) {
        self.elapsed = Some(0.0);
    }

    fn is_finished(&self) -> bool {
        self.elapsed.is_some_and(|e| e > self.time)
    }
}

/// Callback run once when the object is removed. Never holds the removal up.
pub struct FadeOutHandler {
    handler: Box<dyn FnMut(&mut DynamicObject)>,
}

impl FadeOutHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&mut DynamicObject) + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }
}

impl core::fmt::Debug for FadeOutHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FadeOutHandler")
    }
}

impl Behaviour for FadeOutHandler {
    fn update_object_state(&mut self, _: &mut DynamicObject, _: &mut BehaviourContext<'_>) {}

    fn fade_out(&mut self) -> Option<&mut dyn FadeOutHook> {
        Some(self)
    }
}

impl FadeOutHook for FadeOutHandler {
    fn activate(&mut self, obj: &mut DynamicObject, _ctx: &mut ActivationContext<'_>) {
        (self.handler)(obj);
    }

    fn is_finished(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FrameContext;
    use crate::graph::SceneGraph;
    use crate::node::NodeKind;
    use approx::assert_relative_eq;

    #[test]
    fn fade_in_starts_hidden_and_animates_back() {
        let graph = SceneGraph::new();
        let mut frame = FrameContext::with_seed(Vec2::new(10.0, 10.0), 0);
        frame.set_delta(0.1);
        let kind = NodeKind::Empty;
        let mut obj = DynamicObject::default();
        obj.scale = 3.0;
        let mut fade = FadeIn::new(1.0, FadeEffect::ZoomAndFade);
        let mut ctx = BehaviourContext::detached(graph.root(), &mut frame, &graph, &kind);
        fade.update_object_state(&mut obj, &mut ctx);
        assert_eq!(obj.transparency(), 0.0);
        assert_eq!(obj.scale, 0.0);
        assert!(obj.is_animating(AnimatableProperty::Transparency));
        assert!(obj.is_animating(AnimatableProperty::Scale));
        obj.stop_animating_all(true);
        assert_relative_eq!(obj.scale, 3.0);
        assert_relative_eq!(obj.transparency(), 1.0);
    }

    #[test]
    fn fade_out_waits_for_activation() {
        let graph = SceneGraph::new();
        let mut frame = FrameContext::with_seed(Vec2::new(10.0, 10.0), 0);
        frame.set_delta(0.3);
        let kind = NodeKind::Empty;
        let mut obj = DynamicObject::default();
        let mut fade = FadeOut::new(0.5, FadeEffect::Fade);

        let mut ctx = BehaviourContext::detached(graph.root(), &mut frame, &graph, &kind);
        fade.update_object_state(&mut obj, &mut ctx);
        assert!(!fade.is_active());
        assert_eq!(obj.animator_count(), 0);

        let mut actx = ActivationContext::new(graph.root(), Vec2::ZERO, &mut frame);
        fade.activate(&mut obj, &mut actx);
        for expected in [false, true] {
            let mut ctx = BehaviourContext::detached(graph.root(), &mut frame, &graph, &kind);
            fade.update_object_state(&mut obj, &mut ctx);
            assert_eq!(fade.is_finished(), expected);
        }
    }

    #[test]
    fn handler_runs_on_activation() {
        let mut frame = FrameContext::with_seed(Vec2::new(10.0, 10.0), 0);
        let graph = SceneGraph::new();
        let mut obj = DynamicObject::default();
        let mut handler = FadeOutHandler::new(|o| o.angle = 1.0);
        let mut actx = ActivationContext::new(graph.root(), Vec2::ZERO, &mut frame);
        handler.activate(&mut obj, &mut actx);
        assert_eq!(obj.angle, 1.0);
        assert!(handler.is_finished());
    }
}
