use crate::object::DynamicObject;

use super::{Behaviour, BehaviourContext};

/// Removes its object once the fuse runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct Timebomb {
    fuse: f32,
    exploded: bool,
}

impl Timebomb {
    pub fn new(fuse: f32) -> Self {
        Self {
            fuse,
            exploded: false,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.fuse.max(0.0)
    }
}

impl Behaviour for Timebomb {
    fn update_object_state(&mut self, _obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        if self.exploded {
            return;
        }
        self.fuse -= ctx.delta();
        if self.fuse < 0.0 {
            self.exploded = true;
            ctx.remove_object();
            ctx.remove_behaviour::<Self>();
        }
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
    fn fires_once_after_fuse() {
        let graph = SceneGraph::new();
        let mut frame = FrameContext::with_seed(Vec2::new(10.0, 10.0), 0);
        frame.set_delta(0.4);
        let kind = NodeKind::Empty;
        let mut obj = DynamicObject::default();
        let mut bomb = Timebomb::new(1.0);
        let mut queued = Vec::new();
        for _ in 0..5 {
            let mut ctx = BehaviourContext::detached(graph.root(), &mut frame, &graph, &kind);
            bomb.update_object_state(&mut obj, &mut ctx);
            queued.push(frame.take_deferred().len());
        }
        assert_eq!(queued, vec![0, 0, 2, 0, 0]);
    }
}
