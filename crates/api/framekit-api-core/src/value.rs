//! AnimValue: the runtime values an animatable property slot can hold.

use serde::{Deserialize, Serialize};

use crate::math::{Color, Vec2};

/// Coarse kind of an [`AnimValue`], used to validate property targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Vec2,
    Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AnimValue {
    /// Scalar float
    Float(f32),

    /// 2D vector
    Vec2(Vec2),

    /// RGBA colour
    Color(Color),
}

impl AnimValue {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            AnimValue::Float(_) => ValueKind::Float,
            AnimValue::Vec2(_) => ValueKind::Vec2,
            AnimValue::Color(_) => ValueKind::Color,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            AnimValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match *self {
            AnimValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match *self {
            AnimValue::Color(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f32> for AnimValue {
    fn from(v: f32) -> Self {
        AnimValue::Float(v)
    }
}

impl From<Vec2> for AnimValue {
    fn from(v: Vec2) -> Self {
        AnimValue::Vec2(v)
    }
}

impl From<Color> for AnimValue {
    fn from(v: Color) -> Self {
        AnimValue::Color(v)
    }
}
