use bitflags::bitflags;
use framekit_api_core::FloatExt;
use serde::{Deserialize, Serialize};

use crate::object::DynamicObject;

use super::{Behaviour, BehaviourContext};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Axes: u8 {
        const HORIZONTAL = 0x1;
        const VERTICAL = 0x2;
        const BOTH = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

/// Linear damping of momentum on the selected axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Friction {
    coefficient: f32,
    axes: Axes,
}

impl Friction {
    pub fn new(coefficient: f32) -> Self {
        Self::on_axes(coefficient, Axes::BOTH)
    }

    pub fn on_axes(coefficient: f32, axes: Axes) -> Self {
        Self { coefficient, axes }
    }

    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }
}

impl Behaviour for Friction {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        if obj.momentum.is_almost_zero() {
            return;
        }
        // never flips the direction of travel on a long frame
        let factor = (1.0 - self.coefficient * ctx.delta()).max(0.0);
        if self.axes.contains(Axes::HORIZONTAL) {
            obj.momentum.x *= factor;
            if obj.momentum.x.is_almost_zero() {
                obj.momentum.x = 0.0;
            }
        }
        if self.axes.contains(Axes::VERTICAL) {
            obj.momentum.y *= factor;
            if obj.momentum.y.is_almost_zero() {
                obj.momentum.y = 0.0;
            }
        }
    }
}
