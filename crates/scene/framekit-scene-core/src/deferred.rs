//! Deferred edits.
//!
//! Nothing that changes the shape of the tree runs while the tree is walked.
//! Edits are recorded as [`DeferredAction`] values and applied in order once
//! the traversal is over.

use core::any::TypeId;
use core::fmt;

use framekit_animation_core::InterpolationMode;
use framekit_api_core::{AnimValue, Vec2};
use framekit_timeline_core::RecordId;

use crate::behaviour::Behaviour;
use crate::context::FrameContext;
use crate::graph::SceneGraph;
use crate::ids::NodeId;
use crate::node::SceneNode;
use crate::property::{AnimatableProperty, CustomSetter};

/// Callback stored on the engine timeline. Looping timelines fire the same
/// record more than once, so this is `FnMut`.
pub type TimedAction = Box<dyn FnMut(&mut SceneGraph, &mut FrameContext)>;

/// One-shot callback for edits that have no dedicated variant.
pub type DeferredFn = Box<dyn FnOnce(&mut SceneGraph, &mut FrameContext)>;

/// Where a newly attached child goes in its parent's list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Index 0, drawn last and therefore on top.
    #[default]
    Front,
    /// End of the list, drawn first.
    Back,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reorder {
    ToFront,
    ToBack,
    /// Swap with the neighbour closer to the front.
    Up,
    /// Swap with the neighbour closer to the back.
    Down,
}

pub enum DeferredAction {
    /// Attach an existing node, detaching it from any previous parent.
    Attach {
        parent: NodeId,
        child: NodeId,
        placement: Placement,
    },
    /// Insert a new node and attach it. `None` targets the graph root.
    Spawn {
        parent: Option<NodeId>,
        node: Box<SceneNode>,
        placement: Placement,
    },
    /// Detach a node from its parent without destroying it.
    Detach { node: NodeId },
    /// Object removal: runs fade-out behaviours unless `instant`.
    Remove { node: NodeId, instant: bool },
    Reorder { node: NodeId, order: Reorder },
    AddBehaviour {
        node: NodeId,
        behaviour: Box<dyn Behaviour>,
    },
    RemoveBehaviour { node: NodeId, kind: TypeId },
    SetMomentum { node: NodeId, momentum: Vec2 },
    /// Start a property animation from the property's value at apply time.
    Animate {
        node: NodeId,
        property: AnimatableProperty,
        value: AnimValue,
        duration: f32,
        mode: InterpolationMode,
    },
    AnimateCustom {
        node: NodeId,
        setter: CustomSetter,
        from: f32,
        to: f32,
        duration: f32,
        mode: InterpolationMode,
    },
    ScheduleTimer {
        delay: f32,
        action: TimedAction,
        comment: Option<String>,
    },
    CancelTimer { id: RecordId },
    Custom(DeferredFn),
}

impl DeferredAction {
    pub fn label(&self) -> &'static str {
        match self {
            DeferredAction::Attach { .. } => "attach",
            DeferredAction::Spawn { .. } => "spawn",
            DeferredAction::Detach { .. } => "detach",
            DeferredAction::Remove { .. } => "remove",
            DeferredAction::Reorder { .. } => "reorder",
            DeferredAction::AddBehaviour { .. } => "add-behaviour",
            DeferredAction::RemoveBehaviour { .. } => "remove-behaviour",
            DeferredAction::SetMomentum { .. } => "set-momentum",
            DeferredAction::Animate { .. } => "animate",
            DeferredAction::AnimateCustom { .. } => "animate-custom",
            DeferredAction::ScheduleTimer { .. } => "schedule-timer",
            DeferredAction::CancelTimer { .. } => "cancel-timer",
            DeferredAction::Custom(_) => "custom",
        }
    }

    /// Node the edit targets, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            DeferredAction::Attach { child: node, .. }
            | DeferredAction::Detach { node }
            | DeferredAction::Remove { node, .. }
            | DeferredAction::Reorder { node, .. }
            | DeferredAction::AddBehaviour { node, .. }
            | DeferredAction::RemoveBehaviour { node, .. }
            | DeferredAction::SetMomentum { node, .. }
            | DeferredAction::Animate { node, .. }
            | DeferredAction::AnimateCustom { node, .. } => Some(*node),
            _ => None,
        }
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Some(node) => write!(f, "DeferredAction::{}({})", self.label(), node),
            None => write!(f, "DeferredAction::{}", self.label()),
        }
    }
}

/// FIFO of pending edits for the current frame.
#[derive(Default, Debug)]
pub struct DeferredQueue {
    actions: Vec<DeferredAction>,
}

impl DeferredQueue {
    pub fn push(&mut self, action: DeferredAction) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeferredAction> {
        self.actions.iter()
    }

    pub(crate) fn take(&mut self) -> Vec<DeferredAction> {
        core::mem::take(&mut self.actions)
    }
}
