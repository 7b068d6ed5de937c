//! framekit-api-core: shared geometry, colour and animatable value types.

pub mod float;
pub mod math;
pub mod value;

pub use float::{FloatExt, EPSILON};
pub use math::{Color, Rect, Vec2};
pub use value::{AnimValue, ValueKind};
