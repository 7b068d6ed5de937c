use core::any::TypeId;

use framekit_api_core::{Rect, Vec2};
use rand::rngs::StdRng;

use crate::context::FrameContext;
use crate::deferred::DeferredAction;
use crate::graph::{SceneGraph, Space};
use crate::ids::NodeId;
use crate::node::NodeKind;
use crate::object::DynamicObject;

use super::Behaviour;

/// What a behaviour sees while its node is being updated.
///
/// The node itself is out of the graph for the duration of its update, so
/// geometry for it is answered from the pieces held here rather than by
/// looking the node up.
pub struct BehaviourContext<'a> {
    node: NodeId,
    frame: &'a mut FrameContext,
    graph: &'a SceneGraph,
    parent_absolute: Vec2,
    kind: &'a NodeKind,
    children: &'a [NodeId],
}

impl<'a> BehaviourContext<'a> {
    pub(crate) fn new(
        node: NodeId,
        frame: &'a mut FrameContext,
        graph: &'a SceneGraph,
        parent_absolute: Vec2,
        kind: &'a NodeKind,
        children: &'a [NodeId],
    ) -> Self {
        Self {
            node,
            frame,
            graph,
            parent_absolute,
            kind,
            children,
        }
    }

    /// Context for a node with no parent and no children.
    #[cfg(test)]
    pub(crate) fn detached(
        node: NodeId,
        frame: &'a mut FrameContext,
        graph: &'a SceneGraph,
        kind: &'a NodeKind,
    ) -> Self {
        Self::new(node, frame, graph, Vec2::ZERO, kind, &[])
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn delta(&self) -> f32 {
        self.frame.delta()
    }

    pub fn frame(&mut self) -> &mut FrameContext {
        &mut *self.frame
    }

    pub fn graph(&self) -> &'a SceneGraph {
        self.graph
    }

    pub fn defer(&mut self, action: DeferredAction) {
        self.frame.defer(action);
    }

    pub fn rng(&mut self) -> &mut StdRng {
        self.frame.rng()
    }

    pub fn screen_rect(&self) -> Rect {
        self.frame.screen_rect()
    }

    pub fn parent_absolute(&self) -> Vec2 {
        self.parent_absolute
    }

    pub fn absolute_position(&self, obj: &DynamicObject) -> Vec2 {
        self.parent_absolute + obj.position
    }

    pub fn screen_position(&self, obj: &DynamicObject) -> Vec2 {
        self.absolute_position(obj) - self.graph.view_offset()
    }

    /// Bounding box of the node being updated. `None` for nodes without
    /// extent.
    pub fn bounding_box(&self, obj: &DynamicObject, space: Space) -> Option<Rect> {
        let content = self.graph.content_box(obj, self.kind, self.children)?;
        let origin = match space {
            Space::Local => obj.position,
            Space::Absolute => self.absolute_position(obj),
            Space::Screen => self.screen_position(obj),
        };
        Some(content.translated(origin))
    }

    /// Ask for the node to be removed, running its fade-outs first.
    pub fn remove_object(&mut self) {
        self.defer(DeferredAction::Remove {
            node: self.node,
            instant: false,
        });
    }

    pub fn remove_object_instantly(&mut self) {
        self.defer(DeferredAction::Remove {
            node: self.node,
            instant: true,
        });
    }

    pub fn add_behaviour<B: Behaviour>(&mut self, behaviour: B) {
        self.defer(DeferredAction::AddBehaviour {
            node: self.node,
            behaviour: Box::new(behaviour),
        });
    }

    /// Usually called by a behaviour on itself once it is done.
    pub fn remove_behaviour<B: Behaviour>(&mut self) {
        self.defer(DeferredAction::RemoveBehaviour {
            node: self.node,
            kind: TypeId::of::<B>(),
        });
    }

    pub fn is_pressed(&mut self, obj: &DynamicObject) -> bool {
        self.frame.touches.is_pressed(self.node, &obj.interaction)
    }

    pub fn is_tapped(&mut self, obj: &DynamicObject) -> bool {
        self.frame.touches.is_tapped(self.node, &obj.interaction)
    }

    pub fn is_clicked(&mut self, obj: &DynamicObject) -> bool {
        self.frame.touches.is_clicked(self.node, &obj.interaction)
    }
}

/// What a fade-out sees when its owner is removed.
pub struct ActivationContext<'a> {
    node: NodeId,
    absolute_position: Vec2,
    frame: &'a mut FrameContext,
}

impl<'a> ActivationContext<'a> {
    pub(crate) fn new(node: NodeId, absolute_position: Vec2, frame: &'a mut FrameContext) -> Self {
        Self {
            node,
            absolute_position,
            frame,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Absolute position of the object being removed.
    pub fn absolute_position(&self) -> Vec2 {
        self.absolute_position
    }

    pub fn frame(&mut self) -> &mut FrameContext {
        &mut *self.frame
    }

    pub fn defer(&mut self, action: DeferredAction) {
        self.frame.defer(action);
    }
}
