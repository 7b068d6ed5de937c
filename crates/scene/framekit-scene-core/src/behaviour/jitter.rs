use framekit_api_core::Vec2;
use rand::Rng;

use crate::object::DynamicObject;

use super::{Behaviour, BehaviourContext};

/// Shakes the object around the position it had when the jitter started.
#[derive(Clone, Debug, PartialEq)]
pub struct Jitter {
    amount: f32,
    rate: f32,
    duration: Option<f32>,
    origin: Option<Vec2>,
    since_move: f32,
    total: f32,
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new(1.0, 50.0)
    }
}

impl Jitter {
    /// Offsets of up to `amount` on each axis, `rate` times a second.
    pub fn new(amount: f32, rate: f32) -> Self {
        Self {
            amount: amount.abs(),
            rate: rate.max(f32::EPSILON),
            duration: None,
            origin: None,
            since_move: 0.0,
            total: 0.0,
        }
    }

    /// Stop after `duration` seconds and put the object back.
    pub fn for_duration(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn origin(&self) -> Option<Vec2> {
        self.origin
    }
}

impl Behaviour for Jitter {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        let origin = *self.origin.get_or_insert(obj.position);
        let delta = ctx.delta();
        self.since_move += delta;
        self.total += delta;

        if self.duration.is_some_and(|d| self.total >= d) {
            obj.position = origin;
            ctx.remove_behaviour::<Self>();
            return;
        }

        if self.since_move >= 1.0 / self.rate {
            self.since_move = 0.0;
            let a = self.amount;
            let rng = ctx.rng();
            let offset = Vec2::new(rng.gen_range(-a..=a), rng.gen_range(-a..=a));
            obj.position = origin + offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FrameContext;
    use crate::graph::SceneGraph;
    use crate::node::NodeKind;

    #[test]
    fn stays_near_origin_and_returns() {
        let graph = SceneGraph::new();
        let mut frame = FrameContext::with_seed(Vec2::new(10.0, 10.0), 3);
        frame.set_delta(0.1);
        let kind = NodeKind::Empty;
        let mut obj = DynamicObject::at(Vec2::new(5.0, 5.0));
        let mut jitter = Jitter::new(2.0, 20.0).for_duration(0.35);
        for _ in 0..3 {
            let mut ctx = BehaviourContext::detached(graph.root(), &mut frame, &graph, &kind);
            jitter.update_object_state(&mut obj, &mut ctx);
            assert!((obj.position - Vec2::new(5.0, 5.0)).abs().x <= 2.0);
            assert!((obj.position - Vec2::new(5.0, 5.0)).abs().y <= 2.0);
        }
        let mut ctx = BehaviourContext::detached(graph.root(), &mut frame, &graph, &kind);
        jitter.update_object_state(&mut obj, &mut ctx);
        assert_eq!(obj.position, Vec2::new(5.0, 5.0));
        assert_eq!(frame.take_deferred().len(), 1);
    }
}
