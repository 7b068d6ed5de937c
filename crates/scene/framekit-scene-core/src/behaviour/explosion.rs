use framekit_api_core::Vec2;
use log::warn;

use crate::deferred::{DeferredAction, Placement};
use crate::node::SceneNode;
use crate::object::DynamicObject;

use super::{ActivationContext, Behaviour, BehaviourContext, FadeOutHook};

/// Spawns a generated node where the object was when it got removed.
pub struct Explosion {
    generator: Box<dyn FnMut() -> SceneNode>,
    finished: bool,
}

impl Explosion {
    pub fn new<F>(generator: F) -> Self
    where
        F: FnMut() -> SceneNode + 'static,
    {
        Self {
            generator: Box::new(generator),
            finished: false,
        }
    }
}

impl core::fmt::Debug for Explosion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Explosion")
            .field("finished", &self.finished)
            .finish()
    }
}

impl Behaviour for Explosion {
    fn update_object_state(&mut self, _: &mut DynamicObject, _: &mut BehaviourContext<'_>) {}

    fn fade_out(&mut self) -> Option<&mut dyn FadeOutHook> {
        Some(self)
    }
}

impl FadeOutHook for Explosion {
    fn activate(&mut self, _obj: &mut DynamicObject, ctx: &mut ActivationContext<'_>) {
        if self.finished {
            return;
        }
        self.finished = true;
        let mut node = (self.generator)();
        let at = ctx.absolute_position();
        ctx.frame().defer_fn(move |graph, frame| {
            let root = graph.root();
            let root_at = graph.absolute_position(root).unwrap_or(Vec2::ZERO);
            node.object.position = at - root_at;
            let spawn = DeferredAction::Spawn {
                parent: Some(root),
                node: Box::new(node),
                placement: Placement::Front,
            };
            if let Err(err) = graph.apply(spawn, frame) {
                warn!("explosion not spawned: {}", err);
            }
        });
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
