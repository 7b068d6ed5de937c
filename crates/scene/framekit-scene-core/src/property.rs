//! Animatable property slots of a [`DynamicObject`].

use std::rc::Rc;

use framekit_api_core::{AnimValue, Vec2, ValueKind};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::object::DynamicObject;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatableProperty {
    Position,
    ScaleVector,
    Scale,
    Angle,
    Transparency,
    Direction,
    Speed,
    Color,
    /// Driven through a setter closure; several may run at once.
    Custom,
}

impl AnimatableProperty {
    pub fn kind(self) -> ValueKind {
        match self {
            AnimatableProperty::Position | AnimatableProperty::ScaleVector => ValueKind::Vec2,
            AnimatableProperty::Color => ValueKind::Color,
            AnimatableProperty::Scale
            | AnimatableProperty::Angle
            | AnimatableProperty::Transparency
            | AnimatableProperty::Direction
            | AnimatableProperty::Speed
            | AnimatableProperty::Custom => ValueKind::Float,
        }
    }

    pub(crate) fn check(self, value: &AnimValue) -> Result<()> {
        if self == AnimatableProperty::Custom {
            return Err(SceneError::CustomPropertyNeedsSetter);
        }
        if value.kind() != self.kind() {
            return Err(SceneError::PropertyKindMismatch {
                property: self,
                expected: self.kind(),
                actual: value.kind(),
            });
        }
        Ok(())
    }
}

/// Setter used by custom property animations.
pub type CustomSetter = Rc<dyn Fn(&mut DynamicObject, f32)>;

impl DynamicObject {
    /// Current value of a property slot. `Custom` has no readable value.
    pub fn property(&self, property: AnimatableProperty) -> Option<AnimValue> {
        Some(match property {
            AnimatableProperty::Position => self.position.into(),
            AnimatableProperty::ScaleVector => self.scale_vector().into(),
            AnimatableProperty::Scale => self.scale.into(),
            AnimatableProperty::Angle => self.angle.into(),
            AnimatableProperty::Transparency => self.transparency().into(),
            AnimatableProperty::Direction => self.direction().into(),
            AnimatableProperty::Speed => self.speed().into(),
            AnimatableProperty::Color => self.tint.into(),
            AnimatableProperty::Custom => return None,
        })
    }

    /// Write a property slot directly, checking the value kind.
    pub fn set_property(&mut self, property: AnimatableProperty, value: AnimValue) -> Result<()> {
        property.check(&value)?;
        self.write_property(property, value);
        Ok(())
    }

    /// Kind-checked by the caller; mismatched values are ignored.
    pub(crate) fn write_property(&mut self, property: AnimatableProperty, value: AnimValue) {
        match (property, value) {
            (AnimatableProperty::Position, AnimValue::Vec2(v)) => self.position = v,
            (AnimatableProperty::ScaleVector, AnimValue::Vec2(v)) => self.scale_vector = Some(v),
            (AnimatableProperty::Scale, AnimValue::Float(v)) => self.scale = v,
            (AnimatableProperty::Angle, AnimValue::Float(v)) => self.angle = v,
            (AnimatableProperty::Transparency, AnimValue::Float(v)) => self.set_transparency(v),
            (AnimatableProperty::Direction, AnimValue::Float(v)) => self.set_direction(v),
            (AnimatableProperty::Speed, AnimValue::Float(v)) => self.set_speed(v),
            (AnimatableProperty::Color, AnimValue::Color(c)) => self.tint = c,
            _ => {}
        }
    }

    /// Per-axis scale, falling back to the uniform scale.
    pub fn scale_vector(&self) -> Vec2 {
        self.scale_vector.unwrap_or(Vec2::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_api_core::Color;

    #[test]
    fn kinds_are_checked() {
        let mut obj = DynamicObject::default();
        let err = obj
            .set_property(AnimatableProperty::Position, AnimValue::Float(1.0))
            .unwrap_err();
        assert!(matches!(err, SceneError::PropertyKindMismatch { .. }));
        assert_eq!(
            obj.set_property(AnimatableProperty::Custom, AnimValue::Float(1.0)),
            Err(SceneError::CustomPropertyNeedsSetter)
        );
    }

    #[test]
    fn read_write_round_trip() {
        let mut obj = DynamicObject::default();
        obj.set_property(AnimatableProperty::Color, Color::BLACK.into())
            .unwrap();
        assert_eq!(obj.property(AnimatableProperty::Color), Some(Color::BLACK.into()));
        obj.set_property(AnimatableProperty::Scale, AnimValue::Float(2.0))
            .unwrap();
        assert_eq!(
            obj.property(AnimatableProperty::ScaleVector),
            Some(Vec2::splat(2.0).into())
        );
        assert_eq!(obj.property(AnimatableProperty::Custom), None);
    }
}
