use framekit_api_core::Rect;

use crate::graph::Space;
use crate::object::DynamicObject;

use super::{Behaviour, BehaviourContext};

/// Reflects momentum off the edges of a rectangle. The object is not pushed
/// back inside; it only stops heading further out.
#[derive(Clone, Debug, PartialEq)]
pub struct Bouncing {
    area: Option<Rect>,
    space: Space,
}

impl Default for Bouncing {
    fn default() -> Self {
        Self {
            area: None,
            space: Space::Screen,
        }
    }
}

impl Bouncing {
    /// Bounce inside the screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounce inside `area`, measured in `space`.
    pub fn within(area: Rect, space: Space) -> Self {
        Self {
            area: Some(area),
            space,
        }
    }
}

impl Behaviour for Bouncing {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        let Some(bbox) = ctx.bounding_box(obj, self.space) else {
            return;
        };
        let area = self.area.unwrap_or_else(|| ctx.screen_rect());
        let m = &mut obj.momentum;

        if bbox.left() <= area.left() && m.x < 0.0 {
            m.x = m.x.abs();
        } else if bbox.right() >= area.right() && m.x > 0.0 {
            m.x = -m.x.abs();
        }
        if bbox.top() <= area.top() && m.y < 0.0 {
            m.y = m.y.abs();
        } else if bbox.bottom() >= area.bottom() && m.y > 0.0 {
            m.y = -m.y.abs();
        }
    }
}
