use core::f32::consts::{FRAC_PI_2, PI};

use framekit_api_core::{FloatExt, Vec2};
use serde::{Deserialize, Serialize};

use crate::object::DynamicObject;

use super::{Behaviour, BehaviourContext};

/// Default cap on the speed gained along the gravity axis.
pub const DEFAULT_SPEED_LIMIT: f32 = 200.0;

/// Screen-relative pull directions. Positive y points down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityDirection {
    Up,
    Down,
    Left,
    Right,
}

impl GravityDirection {
    pub fn angle(self) -> f32 {
        match self {
            GravityDirection::Up => 1.5 * PI,
            GravityDirection::Down => FRAC_PI_2,
            GravityDirection::Left => PI,
            GravityDirection::Right => 0.0,
        }
    }
}

/// Constant acceleration with a terminal speed along its axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Gravity {
    acceleration: Vec2,
    limit: f32,
}

impl Gravity {
    pub fn new(direction: GravityDirection, strength: f32) -> Self {
        Self::from_angle(direction.angle(), strength)
    }

    pub fn from_angle(angle: f32, strength: f32) -> Self {
        Self {
            acceleration: Vec2::from_polar(strength, angle),
            limit: DEFAULT_SPEED_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: f32) -> Self {
        self.limit = limit;
        self
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }
}

impl Behaviour for Gravity {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        let delta = ctx.delta();
        if delta.is_almost_zero() || self.acceleration.is_almost_zero() {
            return;
        }
        obj.momentum += self.acceleration * delta;

        let axis = self.acceleration.normalize_or_zero();
        let along = obj.momentum.dot(axis);
        if along > self.limit {
            obj.momentum -= axis * (along - self.limit);
        }
    }
}
