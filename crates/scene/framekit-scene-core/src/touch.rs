//! Touch arbitration.
//!
//! Contact points come from an external [`PointerSampler`] once per frame.
//! Touchable nodes look up the first contact inside their screen-space box
//! after their own update; overlapping nodes then compete for it through the
//! claim table, first claim wins.

use bitflags::bitflags;
use framekit_api_core::{Rect, Vec2};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchPhase {
    Invalid,
    Pressed,
    Moved,
    Released,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Vec2,
    pub phase: TouchPhase,
}

/// External source of contact points.
pub trait PointerSampler {
    fn sample(&mut self) -> Vec<TouchPoint>;
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TouchMode: u8 {
        /// Do not claim touches; nodes underneath still see them.
        const TAP_THROUGH = 0x1;
        /// Accept touches already claimed by another node.
        const SHARED = 0x2;
    }
}

/// Per-node touch settings and the contact found this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    pub touchable: bool,
    pub mode: TouchMode,
    pub(crate) touch: Option<TouchPoint>,
}

impl Interaction {
    pub fn touchable() -> Self {
        Self {
            touchable: true,
            ..Self::default()
        }
    }

    /// Contact inside the node's box this frame, if any.
    pub fn touch(&self) -> Option<TouchPoint> {
        self.touch
    }
}

/// This frame's contacts plus the claim table.
#[derive(Default, Debug)]
pub struct TouchFrame {
    points: Vec<TouchPoint>,
    claims: HashMap<u64, NodeId>,
}

impl TouchFrame {
    /// Start a new frame: forget claims and store fresh samples.
    pub fn begin(&mut self, points: Vec<TouchPoint>) {
        self.claims.clear();
        self.points = points;
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    /// First valid contact inside `zone`.
    pub fn find_touch(&self, zone: &Rect) -> Option<TouchPoint> {
        self.points
            .iter()
            .find(|p| p.phase != TouchPhase::Invalid && zone.contains_point(p.position))
            .copied()
    }

    pub fn can_handle(&self, touch_id: u64, node: NodeId) -> bool {
        self.claims.get(&touch_id).map_or(true, |owner| *owner == node)
    }

    /// Record `node` as the handler of `touch_id` unless someone was first.
    pub fn claim(&mut self, touch_id: u64, node: NodeId) {
        self.claims.entry(touch_id).or_insert(node);
    }

    pub fn is_pressed(&mut self, node: NodeId, interaction: &Interaction) -> bool {
        if !interaction.touchable {
            return false;
        }
        let Some(touch) = interaction.touch else {
            return false;
        };
        let unhandled = self.can_handle(touch.id, node);
        if unhandled && !interaction.mode.contains(TouchMode::TAP_THROUGH) {
            self.claim(touch.id, node);
        }
        unhandled || interaction.mode.contains(TouchMode::SHARED)
    }

    /// Pressed, and the contact just went down.
    pub fn is_tapped(&mut self, node: NodeId, interaction: &Interaction) -> bool {
        self.is_pressed(node, interaction)
            && interaction.touch.map(|t| t.phase) == Some(TouchPhase::Pressed)
    }

    /// Pressed, and the contact was just lifted.
    pub fn is_clicked(&mut self, node: NodeId, interaction: &Interaction) -> bool {
        self.is_pressed(node, interaction)
            && interaction.touch.map(|t| t.phase) == Some(TouchPhase::Released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(index: u32) -> NodeId {
        NodeId {
            index,
            generation: 0,
        }
    }

    fn touching(mode: TouchMode, phase: TouchPhase) -> Interaction {
        Interaction {
            touchable: true,
            mode,
            touch: Some(TouchPoint {
                id: 1,
                position: Vec2::new(5.0, 5.0),
                phase,
            }),
        }
    }

    #[test]
    fn first_claim_wins() {
        let mut frame = TouchFrame::default();
        let i = touching(TouchMode::empty(), TouchPhase::Pressed);
        assert!(frame.is_pressed(node(1), &i));
        assert!(!frame.is_pressed(node(2), &i));
        // the owner keeps seeing its touch
        assert!(frame.is_pressed(node(1), &i));
    }

    #[test]
    fn tap_through_does_not_claim_and_shared_ignores_claims() {
        let mut frame = TouchFrame::default();
        let through = touching(TouchMode::TAP_THROUGH, TouchPhase::Pressed);
        assert!(frame.is_pressed(node(1), &through));
        let plain = touching(TouchMode::empty(), TouchPhase::Pressed);
        assert!(frame.is_pressed(node(2), &plain));
        let shared = touching(TouchMode::SHARED, TouchPhase::Pressed);
        assert!(frame.is_pressed(node(3), &shared));
        assert!(!frame.is_pressed(node(4), &plain));
    }

    #[test]
    fn begin_resets_claims() {
        let mut frame = TouchFrame::default();
        frame.claim(1, node(1));
        frame.begin(Vec::new());
        assert!(frame.can_handle(1, node(2)));
    }

    #[test]
    fn phases_distinguish_tap_and_click() {
        let mut frame = TouchFrame::default();
        let released = touching(TouchMode::empty(), TouchPhase::Released);
        assert!(!frame.is_tapped(node(1), &released));
        assert!(frame.is_clicked(node(1), &released));
    }

    #[test]
    fn invalid_points_are_skipped() {
        let mut frame = TouchFrame::default();
        frame.begin(vec![
            TouchPoint {
                id: 1,
                position: Vec2::new(1.0, 1.0),
                phase: TouchPhase::Invalid,
            },
            TouchPoint {
                id: 2,
                position: Vec2::new(2.0, 2.0),
                phase: TouchPhase::Moved,
            },
        ]);
        let zone = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(frame.find_touch(&zone).map(|t| t.id), Some(2));
    }
}
