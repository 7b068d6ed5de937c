use crate::object::DynamicObject;

use super::{Behaviour, BehaviourContext};

/// Fades the object out and in by driving `transparency_shift`.
///
/// One blink is a fade out followed by a fade in. A non-positive count
/// blinks forever.
#[derive(Clone, Debug, PartialEq)]
pub struct Blinking {
    remaining: Option<u32>,
    flip_time: f32,
    elapsed: f32,
    restore: Option<f32>,
}

impl Blinking {
    /// `times` blinks spread over `duration` seconds. With an endless count
    /// `duration` is the period of a single blink.
    pub fn new(times: i32, duration: f32) -> Self {
        let (remaining, flip_time) = if times <= 0 {
            (None, duration / 2.0)
        } else {
            let flips = times as u32 * 2;
            (Some(flips), duration / flips as f32)
        };
        Self {
            remaining,
            flip_time: flip_time.max(f32::EPSILON),
            elapsed: 0.0,
            restore: None,
        }
    }

    pub fn is_endless(&self) -> bool {
        self.remaining.is_none()
    }
}

impl Behaviour for Blinking {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        if self.restore.is_none() {
            self.restore = Some(obj.transparency());
            obj.transparency_shift = -1.0 / self.flip_time;
            return;
        }

        self.elapsed += ctx.delta();
        if self.elapsed < self.flip_time {
            return;
        }
        self.elapsed = 0.0;

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                obj.transparency_shift = 0.0;
                if let Some(alpha) = self.restore {
                    obj.set_transparency(alpha);
                }
                ctx.remove_behaviour::<Self>();
                return;
            }
        }
        obj.transparency_shift = -obj.transparency_shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FrameContext;
    use crate::graph::SceneGraph;
    use crate::node::NodeKind;
    use framekit_api_core::Vec2;

    #[test]
    fn alternates_then_restores() {
        let graph = SceneGraph::new();
        let mut frame = FrameContext::with_seed(Vec2::new(10.0, 10.0), 0);
        frame.set_delta(0.5);
        let kind = NodeKind::Empty;
        let mut obj = DynamicObject::default();
        let mut blink = Blinking::new(1, 1.0);

        let mut shifts = Vec::new();
        for _ in 0..3 {
            let mut ctx = BehaviourContext::detached(graph.root(), &mut frame, &graph, &kind);
            blink.update_object_state(&mut obj, &mut ctx);
            shifts.push(obj.transparency_shift);
        }
        assert_eq!(shifts, vec![-2.0, 2.0, 0.0]);
        assert_eq!(obj.transparency(), 1.0);
        assert_eq!(frame.take_deferred().len(), 1);
    }

    #[test]
    fn non_positive_count_is_endless() {
        assert!(Blinking::new(0, 1.0).is_endless());
        assert!(!Blinking::new(2, 1.0).is_endless());
    }
}
