//! FrameContext: per-frame state threaded through update and draw.
//!
//! Holds everything that would otherwise be ambient engine state: the frame
//! delta, the screen rectangle, this frame's touch samples and claims, the
//! deferred command queue and the random source used by behaviours.

use framekit_api_core::{Rect, Vec2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::deferred::{DeferredAction, DeferredQueue};
use crate::graph::SceneGraph;
use crate::touch::TouchFrame;

pub struct FrameContext {
    delta: f32,
    screen_size: Vec2,
    pub touches: TouchFrame,
    deferred: DeferredQueue,
    rng: StdRng,
}

impl FrameContext {
    pub fn new(screen_size: Vec2) -> Self {
        Self::with_rng(screen_size, StdRng::from_entropy())
    }

    /// Deterministic context for replays and tests.
    pub fn with_seed(screen_size: Vec2, seed: u64) -> Self {
        Self::with_rng(screen_size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(screen_size: Vec2, rng: StdRng) -> Self {
        Self {
            delta: 0.0,
            screen_size,
            touches: TouchFrame::default(),
            deferred: DeferredQueue::default(),
            rng,
        }
    }

    /// Seconds elapsed since the previous frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f32) {
        self.delta = delta;
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::from_origin_size(Vec2::ZERO, self.screen_size)
    }

    /// Queue an edit to run after the current traversal.
    pub fn defer(&mut self, action: DeferredAction) {
        self.deferred.push(action);
    }

    /// Queue an arbitrary callback to run after the current traversal.
    pub fn defer_fn<F>(&mut self, f: F)
    where
        F: FnOnce(&mut SceneGraph, &mut FrameContext) + 'static,
    {
        self.deferred.push(DeferredAction::Custom(Box::new(f)));
    }

    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }

    /// Swap the pending queue for an empty one and hand back what was queued.
    /// Anything deferred while the returned actions run lands in the new queue.
    pub fn take_deferred(&mut self) -> Vec<DeferredAction> {
        self.deferred.take()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Uniform float in `from..to`; returns `from` for an empty range.
    pub fn random_range(&mut self, from: f32, to: f32) -> f32 {
        if to > from {
            self.rng.gen_range(from..to)
        } else {
            from
        }
    }

    pub fn random_sign(&mut self) -> f32 {
        if self.rng.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }

    pub fn random_pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl core::fmt::Debug for FrameContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameContext")
            .field("delta", &self.delta)
            .field("screen_size", &self.screen_size)
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_contexts_agree() {
        let mut a = FrameContext::with_seed(Vec2::new(10.0, 10.0), 7);
        let mut b = FrameContext::with_seed(Vec2::new(10.0, 10.0), 7);
        for _ in 0..5 {
            assert_eq!(a.random_range(-1.0, 1.0), b.random_range(-1.0, 1.0));
        }
    }

    #[test]
    fn take_swaps_in_fresh_queue() {
        let mut ctx = FrameContext::with_seed(Vec2::new(1.0, 1.0), 0);
        ctx.defer_fn(|_, _| {});
        let taken = ctx.take_deferred();
        assert_eq!(taken.len(), 1);
        assert!(ctx.deferred().is_empty());
    }

    #[test]
    fn empty_range_is_stable() {
        let mut ctx = FrameContext::with_seed(Vec2::ZERO, 1);
        assert_eq!(ctx.random_range(3.0, 3.0), 3.0);
        assert_eq!(ctx.screen_rect(), Rect::new(0.0, 0.0, 0.0, 0.0));
    }
}
