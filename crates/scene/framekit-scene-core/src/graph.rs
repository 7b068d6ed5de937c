//! SceneGraph: generational arena of nodes plus the update and draw passes.
//!
//! Parent links are plain [`NodeId`]s; each group owns the ordered list of
//! its children. Every structural edit goes through [`DeferredAction`] and
//! is applied by [`SceneGraph::apply`] between traversals.
//!
//! While a node is updated it is taken out of its slot. That is what lets
//! its behaviours get `&mut DynamicObject` and a shared view of the rest of
//! the graph at the same time.

use bitflags::bitflags;
use framekit_animation_core::InterpolationMode;
use framekit_api_core::{Rect, Vec2};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::behaviour::{ActivationContext, BehaviourContext, BezierMovement};
use crate::context::FrameContext;
use crate::deferred::{DeferredAction, Placement, Reorder};
use crate::error::{Result, SceneError};
use crate::ids::NodeId;
use crate::node::{NodeKind, SceneNode};
use crate::object::{DynamicObject, PauseTarget};
use crate::render::{DrawTransform, RenderSink};
use crate::scroll::{ScrollManager, ScrollView};

/// Depth of the first drawn visual.
pub const FIRST_LAYER: f32 = 1.0;
/// Depth decrement between consecutive visuals.
pub const LAYER_STEP: f32 = 1e-5;

/// Coordinate space for positions and boxes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Space {
    /// Relative to the parent node.
    Local,
    /// Sum of the node's and all ancestors' positions.
    #[default]
    Absolute,
    /// Absolute minus the view offset.
    Screen,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RectSide: u8 {
        const TOP = 0x1;
        const LEFT = 0x2;
        const RIGHT = 0x4;
        const BOTTOM = 0x8;
        const ANY = Self::TOP.bits() | Self::LEFT.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits();
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    view_offset: Vec2,
    scroll: Option<Box<dyn ScrollManager>>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("root", &self.root)
            .field("nodes", &self.len())
            .field("view_offset", &self.view_offset)
            .finish()
    }
}

impl SceneGraph {
    /// Graph with an empty root group at the origin.
    pub fn new() -> Self {
        Self::with_root(SceneNode::group(Vec2::ZERO))
    }

    pub fn with_root(root: SceneNode) -> Self {
        let mut graph = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            view_offset: Vec2::ZERO,
            scroll: None,
        };
        graph.root = graph.insert(root);
        graph
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Store a node without attaching it anywhere. It takes part in update
    /// and draw once an [`DeferredAction::Attach`] for it has been applied.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// First node with the given name, depth first from the root.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.name.as_deref() == Some(name) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(at) = current {
            if at == self.root {
                return true;
            }
            current = self.parent(at);
        }
        false
    }

    fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut current = self.parent(of);
        while let Some(at) = current {
            if at == ancestor {
                return true;
            }
            current = self.parent(at);
        }
        false
    }

    pub fn view_offset(&self) -> Vec2 {
        self.view_offset
    }

    pub fn set_view_offset(&mut self, offset: Vec2) {
        self.view_offset = offset;
    }

    pub fn set_scroll_manager(&mut self, manager: Option<Box<dyn ScrollManager>>) {
        self.scroll = manager;
    }

    // --- positions and boxes ---

    pub fn absolute_position(&self, id: NodeId) -> Option<Vec2> {
        let mut node = self.get(id)?;
        let mut at = node.object.position;
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            at += node.object.position;
        }
        Some(at)
    }

    pub fn screen_position(&self, id: NodeId) -> Option<Vec2> {
        self.absolute_position(id).map(|p| p - self.view_offset)
    }

    pub fn position_in(&self, id: NodeId, space: Space) -> Option<Vec2> {
        match space {
            Space::Local => self.get(id).map(|n| n.object.position),
            Space::Absolute => self.absolute_position(id),
            Space::Screen => self.screen_position(id),
        }
    }

    /// Extent of a node relative to its own position. Groups report the union
    /// of their children, or a zero box when nothing inside has extent.
    pub(crate) fn content_box(
        &self,
        obj: &DynamicObject,
        kind: &NodeKind,
        children: &[NodeId],
    ) -> Option<Rect> {
        match kind {
            NodeKind::Empty => None,
            NodeKind::Visual(visual) => {
                let scale = obj.scale_vector();
                Some(Rect::from_origin_size(
                    -(visual.hot_spot() * scale),
                    visual.size() * scale,
                ))
            }
            NodeKind::Group { .. } => Some(
                children
                    .iter()
                    .filter_map(|&child| self.local_box(child))
                    .reduce(|a, b| a.union(&b))
                    .unwrap_or(Rect::at(Vec2::ZERO)),
            ),
        }
    }

    fn local_box(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        self.content_box(&node.object, &node.kind, &node.children)
            .map(|r| r.translated(node.object.position))
    }

    pub fn bounding_box(&self, id: NodeId, space: Space) -> Option<Rect> {
        let node = self.get(id)?;
        let content = self.content_box(&node.object, &node.kind, &node.children)?;
        Some(content.translated(self.position_in(id, space)?))
    }

    pub fn is_inside_rect(&self, id: NodeId, rect: &Rect, space: Space) -> bool {
        self.bounding_box(id, space)
            .is_some_and(|b| rect.contains_rect(&b))
    }

    pub fn is_outside_rect(&self, id: NodeId, rect: &Rect, space: Space) -> bool {
        self.bounding_box(id, space)
            .map_or(true, |b| !b.intersects(rect))
    }

    /// Crossing one of `sides` of `rect` from outside, moving inwards.
    pub fn enters_rect(&self, id: NodeId, rect: &Rect, space: Space, sides: RectSide) -> bool {
        let (Some(b), Some(node)) = (self.bounding_box(id, space), self.get(id)) else {
            return false;
        };
        let m = node.object.momentum;
        (sides.contains(RectSide::LEFT)
            && m.x > 0.0
            && b.left() < rect.left()
            && b.right() >= rect.left())
            || (sides.contains(RectSide::RIGHT)
                && m.x < 0.0
                && b.right() > rect.right()
                && b.left() <= rect.right())
            || (sides.contains(RectSide::TOP)
                && m.y > 0.0
                && b.top() < rect.top()
                && b.bottom() >= rect.top())
            || (sides.contains(RectSide::BOTTOM)
                && m.y < 0.0
                && b.bottom() > rect.bottom()
                && b.top() <= rect.bottom())
    }

    /// Crossing one of `sides` of `rect` from inside, moving outwards.
    pub fn leaves_rect(&self, id: NodeId, rect: &Rect, space: Space, sides: RectSide) -> bool {
        let (Some(b), Some(node)) = (self.bounding_box(id, space), self.get(id)) else {
            return false;
        };
        let m = node.object.momentum;
        (sides.contains(RectSide::LEFT)
            && m.x < 0.0
            && b.left() <= rect.left()
            && b.right() > rect.left())
            || (sides.contains(RectSide::RIGHT)
                && m.x > 0.0
                && b.right() >= rect.right()
                && b.left() < rect.right())
            || (sides.contains(RectSide::TOP)
                && m.y < 0.0
                && b.top() <= rect.top()
                && b.bottom() > rect.top())
            || (sides.contains(RectSide::BOTTOM)
                && m.y > 0.0
                && b.bottom() >= rect.bottom()
                && b.top() < rect.bottom())
    }

    // --- deferred structural API ---

    pub fn add_child(&self, ctx: &mut FrameContext, parent: NodeId, child: NodeId) {
        self.add_child_deferred(ctx, parent, child, Placement::Front);
    }

    pub fn add_child_deferred(
        &self,
        ctx: &mut FrameContext,
        parent: NodeId,
        child: NodeId,
        placement: Placement,
    ) {
        ctx.defer(DeferredAction::Attach {
            parent,
            child,
            placement,
        });
    }

    /// Queue a new node under `parent`, or under the root for `None`.
    pub fn spawn_child(
        &self,
        ctx: &mut FrameContext,
        parent: Option<NodeId>,
        node: SceneNode,
        placement: Placement,
    ) {
        ctx.defer(DeferredAction::Spawn {
            parent,
            node: Box::new(node),
            placement,
        });
    }

    /// Detach `child` from its parent without destroying it.
    pub fn remove_child(&self, ctx: &mut FrameContext, child: NodeId) {
        ctx.defer(DeferredAction::Detach { node: child });
    }

    /// Remove with fade-outs.
    pub fn remove(&self, ctx: &mut FrameContext, node: NodeId) {
        ctx.defer(DeferredAction::Remove {
            node,
            instant: false,
        });
    }

    pub fn remove_instantly(&self, ctx: &mut FrameContext, node: NodeId) {
        ctx.defer(DeferredAction::Remove {
            node,
            instant: true,
        });
    }

    pub fn bring_to_front(&self, ctx: &mut FrameContext, node: NodeId) {
        ctx.defer(DeferredAction::Reorder {
            node,
            order: Reorder::ToFront,
        });
    }

    pub fn bring_to_back(&self, ctx: &mut FrameContext, node: NodeId) {
        ctx.defer(DeferredAction::Reorder {
            node,
            order: Reorder::ToBack,
        });
    }

    pub fn bring_up(&self, ctx: &mut FrameContext, node: NodeId) {
        ctx.defer(DeferredAction::Reorder {
            node,
            order: Reorder::Up,
        });
    }

    pub fn bring_down(&self, ctx: &mut FrameContext, node: NodeId) {
        ctx.defer(DeferredAction::Reorder {
            node,
            order: Reorder::Down,
        });
    }

    /// Replace any curve motion on `node` with a new one through `points`.
    pub fn move_along_curve(
        &self,
        ctx: &mut FrameContext,
        node: NodeId,
        points: Vec<Vec2>,
        speed: Option<f32>,
    ) -> Result<()> {
        let mut curve = BezierMovement::new(points)?;
        if let Some(speed) = speed {
            curve = curve.with_speed(speed);
        }
        ctx.defer(DeferredAction::RemoveBehaviour {
            node,
            kind: core::any::TypeId::of::<BezierMovement>(),
        });
        ctx.defer(DeferredAction::AddBehaviour {
            node,
            behaviour: Box::new(curve),
        });
        Ok(())
    }

    /// Queue a property animation that starts from the value the property has
    /// when the queue is drained.
    pub fn animate_deferred(
        &self,
        ctx: &mut FrameContext,
        node: NodeId,
        property: crate::property::AnimatableProperty,
        value: framekit_api_core::AnimValue,
        duration: f32,
        mode: InterpolationMode,
    ) -> Result<()> {
        property.check(&value)?;
        ctx.defer(DeferredAction::Animate {
            node,
            property,
            value,
            duration,
            mode,
        });
        Ok(())
    }

    // --- applying edits ---

    /// Apply one queued edit. Edits aimed at nodes that no longer exist are
    /// dropped; attaching under a missing or non-group parent, or creating a
    /// cycle, is an error.
    pub fn apply(&mut self, action: DeferredAction, ctx: &mut FrameContext) -> Result<()> {
        trace!("apply {:?}", action);
        match action {
            DeferredAction::Attach {
                parent,
                child,
                placement,
            } => self.attach(parent, child, placement),
            DeferredAction::Spawn {
                parent,
                node,
                placement,
            } => {
                let parent = parent.unwrap_or(self.root);
                self.check_parent(parent)?;
                let child = self.insert(*node);
                self.attach(parent, child, placement)
            }
            DeferredAction::Detach { node } => {
                self.detach(node);
                Ok(())
            }
            DeferredAction::Remove { node, instant } => {
                self.remove_now(node, instant, ctx);
                Ok(())
            }
            DeferredAction::Reorder { node, order } => {
                self.reorder(node, order);
                Ok(())
            }
            DeferredAction::AddBehaviour { node, behaviour } => {
                if let Some(n) = self.live_mut(node) {
                    n.behaviours.add_boxed(behaviour);
                }
                Ok(())
            }
            DeferredAction::RemoveBehaviour { node, kind } => {
                if let Some(n) = self.live_mut(node) {
                    n.behaviours.remove_kind(kind);
                }
                Ok(())
            }
            DeferredAction::SetMomentum { node, momentum } => {
                if let Some(n) = self.live_mut(node) {
                    n.object.momentum = momentum;
                }
                Ok(())
            }
            DeferredAction::Animate {
                node,
                property,
                value,
                duration,
                mode,
            } => match self.live_mut(node) {
                Some(n) => n.object.animate_property(property, value, duration, mode),
                None => Ok(()),
            },
            DeferredAction::AnimateCustom {
                node,
                setter,
                from,
                to,
                duration,
                mode,
            } => match self.live_mut(node) {
                Some(n) => n.object.push_custom(setter, from, to, duration, mode, false),
                None => Ok(()),
            },
            DeferredAction::ScheduleTimer { .. } | DeferredAction::CancelTimer { .. } => {
                warn!("timer edits need the engine timeline; dropped");
                Ok(())
            }
            DeferredAction::Custom(f) => {
                f(self, ctx);
                Ok(())
            }
        }
    }

    fn live_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        let node = self.get_mut(id);
        if node.is_none() {
            debug!("{}: node is gone; edit dropped", id);
        }
        node
    }

    fn check_parent(&self, parent: NodeId) -> Result<()> {
        match self.get(parent) {
            None => Err(SceneError::UnknownNode { id: parent }),
            Some(n) if !n.kind.is_group() => Err(SceneError::NotAGroup { id: parent }),
            Some(_) => Ok(()),
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, placement: Placement) -> Result<()> {
        self.check_parent(parent)?;
        let Some(current) = self.get(child).map(|n| n.parent) else {
            debug!("{}: node is gone; attach dropped", child);
            return Ok(());
        };
        if current == Some(parent) {
            return Ok(());
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            match placement {
                Placement::Front => p.children.insert(0, child),
                Placement::Back => p.children.push(child),
            }
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
    }

    fn reorder(&mut self, id: NodeId, order: Reorder) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(siblings) = self.get_mut(parent).map(|p| &mut p.children) else {
            return;
        };
        let Some(idx) = siblings.iter().position(|&c| c == id) else {
            return;
        };
        match order {
            Reorder::ToFront => {
                siblings.remove(idx);
                siblings.insert(0, id);
            }
            Reorder::ToBack => {
                siblings.remove(idx);
                siblings.push(id);
            }
            Reorder::Up if idx > 0 => siblings.swap(idx, idx - 1),
            Reorder::Down if idx + 1 < siblings.len() => siblings.swap(idx, idx + 1),
            Reorder::Up | Reorder::Down => {}
        }
    }

    fn remove_now(&mut self, id: NodeId, instant: bool, ctx: &mut FrameContext) {
        if id == self.root {
            warn!("the root node cannot be removed");
            return;
        }
        let at = self.absolute_position(id).unwrap_or(Vec2::ZERO);
        let Some(node) = self.live_mut(id) else {
            return;
        };
        if !instant {
            if node.object.fading_out {
                return;
            }
            node.object.fading_out = true;
            let SceneNode {
                object, behaviours, ..
            } = node;
            let mut actx = ActivationContext::new(id, at, ctx);
            let started = behaviours.activate_fade_outs(object, &mut actx);
            if started > 0 {
                debug!("{}: {} fade-out(s) started", id, started);
                return;
            }
        }
        self.destroy(id);
    }

    /// Detach and free a whole subtree.
    fn destroy(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(at) = stack.pop() {
            let Some(slot) = self.slots.get_mut(at.index as usize) else {
                continue;
            };
            if slot.generation != at.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(at.index);
        }
        trace!("{} destroyed", id);
    }

    // --- passes ---

    /// Update every attached node, parents before children and each child
    /// list in index order.
    pub fn update(&mut self, ctx: &mut FrameContext) {
        if let Some(mut scroll) = self.scroll.take() {
            let view = ScrollView {
                graph: self,
                delta: ctx.delta(),
                screen_size: ctx.screen_size(),
            };
            let offset = scroll.update_scrolling(self.view_offset, &view);
            self.view_offset = offset;
            self.scroll = Some(scroll);
        }
        self.update_node(self.root, Vec2::ZERO, ctx);
    }

    fn take(&mut self, id: NodeId) -> Option<SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.take())
    }

    fn put_back(&mut self, id: NodeId, node: SceneNode) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            slot.node = Some(node);
        }
    }

    fn update_node(&mut self, id: NodeId, parent_absolute: Vec2, ctx: &mut FrameContext) {
        let Some(mut node) = self.take(id) else {
            return;
        };
        {
            let SceneNode {
                kind,
                object,
                behaviours,
                children,
                ..
            } = &mut node;
            let mut bctx =
                BehaviourContext::new(id, ctx, self, parent_absolute, kind, children.as_slice());
            object.update(behaviours, &mut bctx);
        }

        let delta = ctx.delta();
        if !node.object.pause.contains(PauseTarget::SPRITE_ANIMATION) {
            if let NodeKind::Visual(visual) = &mut node.kind {
                visual.update(delta);
            }
        }

        let absolute = parent_absolute + node.object.position;
        if node.object.interaction.touchable {
            let zone = self
                .content_box(&node.object, &node.kind, &node.children)
                .map(|r| r.translated(absolute - self.view_offset));
            node.object.interaction.touch = zone.and_then(|z| ctx.touches.find_touch(&z));
        }

        let bound_alpha = match node.kind {
            NodeKind::Group {
                bind_transparency: true,
            } => Some(node.object.transparency()),
            _ => None,
        };
        let children = node.children.clone();
        self.put_back(id, node);

        for child in children {
            if let Some(alpha) = bound_alpha {
                if let Some(c) = self.get_mut(child) {
                    c.object.set_transparency(alpha);
                }
            }
            self.update_node(child, absolute, ctx);
        }
    }

    /// Hand every visible visual to `sink`, back to front. Returns how many
    /// visuals were drawn.
    pub fn draw(&self, sink: &mut dyn RenderSink) -> usize {
        let mut layer = FIRST_LAYER;
        let mut drawn = 0;
        self.draw_node(self.root, Vec2::ZERO, &mut layer, &mut drawn, sink);
        drawn
    }

    fn draw_node(
        &self,
        id: NodeId,
        parent_absolute: Vec2,
        layer: &mut f32,
        drawn: &mut usize,
        sink: &mut dyn RenderSink,
    ) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.object.visible {
            return;
        }
        let absolute = parent_absolute + node.object.position;
        if let NodeKind::Visual(visual) = &node.kind {
            let transform = DrawTransform {
                position: absolute - self.view_offset,
                angle: node.object.angle,
                scale: node.object.scale_vector(),
                tint: node.object.tint,
                hot_spot: visual.hot_spot(),
                layer: *layer,
            };
            visual.draw(&transform, sink);
            *layer -= LAYER_STEP;
            *drawn += 1;
        }
        for &child in node.children.iter().rev() {
            self.draw_node(child, absolute, layer, drawn, sink);
        }
    }
}
