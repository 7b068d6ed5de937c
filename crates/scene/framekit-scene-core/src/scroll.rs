//! View scrolling. The view offset is subtracted from absolute positions to
//! get screen positions.

use framekit_animation_core::{InterpolationMode, PropertyAnimator};
use framekit_api_core::{Rect, Vec2};

use crate::error::Result;
use crate::graph::SceneGraph;
use crate::ids::NodeId;

/// Read-only view of the scene handed to a scroll manager.
pub struct ScrollView<'a> {
    pub graph: &'a SceneGraph,
    pub delta: f32,
    pub screen_size: Vec2,
}

pub trait ScrollManager {
    /// Return the new view offset given the previous one.
    fn update_scrolling(&mut self, offset: Vec2, view: &ScrollView<'_>) -> Vec2;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoScroll;

impl ScrollManager for NoScroll {
    fn update_scrolling(&mut self, offset: Vec2, _: &ScrollView<'_>) -> Vec2 {
        offset
    }
}

/// Eased pan between two offsets.
#[derive(Clone, Debug)]
pub struct LinearScroll {
    animator: PropertyAnimator<Vec2>,
}

impl LinearScroll {
    pub fn new(from: Vec2, to: Vec2, duration: f32, mode: InterpolationMode) -> Result<Self> {
        Ok(Self {
            animator: PropertyAnimator::new(from, to, duration, mode)?,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.animator.is_finished()
    }
}

impl ScrollManager for LinearScroll {
    fn update_scrolling(&mut self, offset: Vec2, view: &ScrollView<'_>) -> Vec2 {
        self.animator
            .advance(view.delta)
            .map_or(offset, |step| step.value)
    }
}

/// Keeps a node in the middle of the screen, optionally without showing
/// anything outside `level`.
#[derive(Clone, Debug)]
pub struct FollowScroll {
    target: NodeId,
    level: Option<Rect>,
}

impl FollowScroll {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            level: None,
        }
    }

    pub fn within(mut self, level: Rect) -> Self {
        self.level = Some(level);
        self
    }
}

impl ScrollManager for FollowScroll {
    fn update_scrolling(&mut self, offset: Vec2, view: &ScrollView<'_>) -> Vec2 {
        let Some(at) = view.graph.absolute_position(self.target) else {
            return offset;
        };
        let mut next = at - view.screen_size / 2.0;
        if let Some(level) = self.level {
            let max_x = (level.right() - view.screen_size.x).max(level.left());
            let max_y = (level.bottom() - view.screen_size.y).max(level.top());
            next.x = next.x.clamp(level.left(), max_x);
            next.y = next.y.clamp(level.top(), max_y);
        }
        next
    }
}
