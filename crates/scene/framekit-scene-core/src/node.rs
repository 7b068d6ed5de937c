//! Scene nodes as stored in the graph arena.

use framekit_api_core::Vec2;

use crate::behaviour::{Behaviour, Behaviours};
use crate::ids::NodeId;
use crate::object::DynamicObject;
use crate::render::Visual;
use crate::touch::Interaction;

/// What a node is, beyond its dynamic state.
pub enum NodeKind {
    /// Ordered container; index 0 is the front.
    Group {
        /// Copy this node's transparency onto its children every update.
        bind_transparency: bool,
    },
    Visual(Box<dyn Visual>),
    /// No extent and nothing to draw; a pure transform or logic holder.
    Empty,
}

impl NodeKind {
    pub fn is_group(&self) -> bool {
        matches!(self, NodeKind::Group { .. })
    }

    pub fn visual(&self) -> Option<&dyn Visual> {
        match self {
            NodeKind::Visual(v) => Some(v.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NodeKind::Group { bind_transparency } => f
                .debug_struct("Group")
                .field("bind_transparency", bind_transparency)
                .finish(),
            NodeKind::Visual(v) => f.debug_tuple("Visual").field(&v.size()).finish(),
            NodeKind::Empty => f.write_str("Empty"),
        }
    }
}

#[derive(Debug)]
pub struct SceneNode {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub kind: NodeKind,
    pub object: DynamicObject,
    pub behaviours: Behaviours,
    pub name: Option<String>,
}

impl SceneNode {
    pub fn new(kind: NodeKind, object: DynamicObject) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            kind,
            object,
            behaviours: Behaviours::default(),
            name: None,
        }
    }

    pub fn group(position: Vec2) -> Self {
        Self::new(
            NodeKind::Group {
                bind_transparency: false,
            },
            DynamicObject::at(position),
        )
    }

    /// Visual nodes are touchable by default.
    pub fn visual<V: Visual + 'static>(position: Vec2, visual: V) -> Self {
        let mut object = DynamicObject::at(position);
        object.interaction = Interaction::touchable();
        Self::new(NodeKind::Visual(Box::new(visual)), object)
    }

    pub fn empty(position: Vec2) -> Self {
        Self::new(NodeKind::Empty, DynamicObject::at(position))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_behaviour<B: Behaviour>(mut self, behaviour: B) -> Self {
        self.behaviours.add(behaviour);
        self
    }

    /// No effect on non-group nodes.
    pub fn with_bound_transparency(mut self) -> Self {
        if let NodeKind::Group { bind_transparency } = &mut self.kind {
            *bind_transparency = true;
        }
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
