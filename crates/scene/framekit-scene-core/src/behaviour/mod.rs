//! Per-object behaviour registry.
//!
//! A [`Behaviours`] set holds at most one behaviour per concrete type. The
//! type id is the key, so `add` of a second instance of the same type is a
//! no-op and `get::<B>()` never needs to search.
//!
//! Behaviours that want to intercept removal expose a [`FadeOutHook`] through
//! [`Behaviour::fade_out`]. A removed object stays in the tree until every
//! fade-out it carries reports finished.

use core::any::{Any, TypeId};

use framekit_api_core::Vec2;
use indexmap::IndexMap;
use log::debug;

use crate::deferred::DeferredAction;
use crate::object::DynamicObject;

mod bezier;
mod blinking;
mod bouncing;
mod context;
mod explosion;
mod fade;
mod friction;
mod gravity;
mod jitter;
mod timebomb;

pub use bezier::{BezierMovement, BezierSegment};
pub use blinking::Blinking;
pub use bouncing::Bouncing;
pub use context::{ActivationContext, BehaviourContext};
pub use explosion::Explosion;
pub use fade::{FadeEffect, FadeIn, FadeOut, FadeOutHandler};
pub use friction::{Axes, Friction};
pub use gravity::{Gravity, GravityDirection};
pub use jitter::Jitter;
pub use timebomb::Timebomb;

/// Upcast helper so boxed behaviours can be downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-frame logic attached to one object.
pub trait Behaviour: AsAny {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>);

    /// Removal hook, if this behaviour has one.
    fn fade_out(&mut self) -> Option<&mut dyn FadeOutHook> {
        None
    }
}

/// Removal-time effect. `activate` runs once when the owner is removed; the
/// owner is destroyed when all of its fade-outs report finished.
pub trait FadeOutHook {
    fn activate(&mut self, obj: &mut DynamicObject, ctx: &mut ActivationContext<'_>);
    fn is_finished(&self) -> bool;
}

#[derive(Default)]
pub struct Behaviours {
    entries: IndexMap<TypeId, Box<dyn Behaviour>>,
}

impl core::fmt::Debug for Behaviours {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Behaviours")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Behaviours {
    /// Returns `false` when a behaviour of the same type is already present;
    /// the existing one is kept.
    pub fn add<B: Behaviour>(&mut self, behaviour: B) -> bool {
        self.add_boxed(Box::new(behaviour))
    }

    pub fn add_boxed(&mut self, behaviour: Box<dyn Behaviour>) -> bool {
        let kind = (*behaviour).as_any().type_id();
        if self.entries.contains_key(&kind) {
            debug!("behaviour {:?} already attached; ignoring", kind);
            return false;
        }
        self.entries.insert(kind, behaviour);
        true
    }

    pub fn remove<B: Behaviour>(&mut self) -> Option<Box<dyn Behaviour>> {
        self.remove_kind(TypeId::of::<B>())
    }

    pub fn remove_kind(&mut self, kind: TypeId) -> Option<Box<dyn Behaviour>> {
        self.entries.shift_remove(&kind)
    }

    /// Drop every behaviour that has a removal hook.
    pub fn remove_any_fade_out(&mut self) {
        self.entries.retain(|_, b| b.fade_out().is_none());
    }

    pub fn get<B: Behaviour>(&self) -> Option<&B> {
        self.entries
            .get(&TypeId::of::<B>())
            .and_then(|b| (**b).as_any().downcast_ref::<B>())
    }

    pub fn get_mut<B: Behaviour>(&mut self) -> Option<&mut B> {
        self.entries
            .get_mut(&TypeId::of::<B>())
            .and_then(|b| (**b).as_any_mut().downcast_mut::<B>())
    }

    pub fn contains<B: Behaviour>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<B>())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every behaviour once, in insertion order, then check whether a
    /// fading object can go.
    pub fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        let mut has_fade_out = false;
        let mut all_finished = true;
        for behaviour in self.entries.values_mut() {
            behaviour.update_object_state(obj, ctx);
            if let Some(fade) = behaviour.fade_out() {
                has_fade_out = true;
                all_finished &= fade.is_finished();
            }
        }
        if obj.fading_out && has_fade_out && all_finished {
            debug!("{}: all fade-outs finished", ctx.node());
            ctx.defer(DeferredAction::Remove {
                node: ctx.node(),
                instant: true,
            });
        }
    }

    /// Activate every removal hook. Returns how many there were.
    pub fn activate_fade_outs(
        &mut self,
        obj: &mut DynamicObject,
        ctx: &mut ActivationContext<'_>,
    ) -> usize {
        let mut count = 0;
        for behaviour in self.entries.values_mut() {
            if let Some(fade) = behaviour.fade_out() {
                fade.activate(obj, ctx);
                count += 1;
            }
        }
        count
    }
}

/// Momentum that keeps the current speed but points along `chord`.
pub(crate) fn steer(chord: Vec2, speed: f32) -> Vec2 {
    chord.normalize_or_zero() * speed
}
