//! framekit-scene-core
//!
//! Engine-agnostic scene graph: dynamic objects with behaviours and property
//! animators, a generational node arena, the deferred edit queue and the
//! per-frame update and draw passes. No rendering, input or asset code lives
//! here; those come in through the traits in [`render`] and [`touch`].

mod animators;
pub mod behaviour;
pub mod context;
pub mod deferred;
pub mod error;
pub mod graph;
pub mod ids;
pub mod node;
pub mod object;
pub mod property;
pub mod render;
pub mod scroll;
pub mod touch;

pub use behaviour::{
    ActivationContext, Axes, Behaviour, BehaviourContext, Behaviours, BezierMovement,
    BezierSegment, Blinking, Bouncing, Explosion, FadeEffect, FadeIn, FadeOut, FadeOutHandler,
    FadeOutHook, Friction, Gravity, GravityDirection, Jitter, Timebomb,
};
pub use context::FrameContext;
pub use deferred::{DeferredAction, DeferredFn, DeferredQueue, Placement, Reorder, TimedAction};
pub use error::{Result, SceneError};
pub use graph::{RectSide, SceneGraph, Space, FIRST_LAYER, LAYER_STEP};
pub use ids::NodeId;
pub use node::{NodeKind, SceneNode};
pub use object::{DynamicObject, PauseTarget};
pub use property::{AnimatableProperty, CustomSetter};
pub use render::{AssetHandle, AssetProvider, DrawTransform, RenderSink, Sprite, Visual};
pub use scroll::{FollowScroll, LinearScroll, NoScroll, ScrollManager, ScrollView};
pub use touch::{Interaction, PointerSampler, TouchFrame, TouchMode, TouchPhase, TouchPoint};
