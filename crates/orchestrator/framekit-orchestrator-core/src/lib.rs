//! framekit-orchestrator
//!
//! The frame scheduler. An [`Engine`] owns the storyboard of scenes, the
//! timeline of scheduled callbacks and the [`FrameContext`] threaded through
//! every update. One call to [`Engine::update`] samples input, fires a due
//! timeline record, walks the current scene and then drains the deferred
//! edit queue exactly once.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod scheduler;
pub mod storyboard;

use framekit_scene_core::{
    DeferredAction, FrameContext, PointerSampler, RenderSink, SceneGraph, TimedAction,
};
use framekit_timeline_core::{RecordId, Timeline};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use crate::config::EngineConfig;
pub use crate::diagnostics::FpsCounter;
pub use crate::error::{EngineError, Result};
pub use crate::storyboard::Storyboard;

/// What happened during one [`Engine::update`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Frames completed so far, this one included.
    pub frame: u64,
    pub dt: f32,
    /// Timeline record fired this frame.
    pub fired: Option<RecordId>,
    /// Deferred edits drained at the end of the frame.
    pub applied: usize,
}

pub struct Engine {
    cfg: EngineConfig,
    storyboard: Storyboard,
    timeline: Timeline<TimedAction>,
    ctx: FrameContext,
    sampler: Option<Box<dyn PointerSampler>>,
    frame: u64,
    fps: FpsCounter,
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("frame", &self.frame)
            .field("scene", &self.storyboard.current_name())
            .field("timeline", &self.timeline)
            .field("ctx", &self.ctx)
            .finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        let ctx = match cfg.rng_seed {
            Some(seed) => FrameContext::with_seed(cfg.screen_size, seed),
            None => FrameContext::new(cfg.screen_size),
        };
        Self {
            timeline: Timeline::with_config(cfg.timeline.clone()),
            fps: FpsCounter::new(cfg.fps_logging, cfg.fps_warn_threshold),
            storyboard: Storyboard::new(),
            sampler: None,
            frame: 0,
            ctx,
            cfg,
        }
    }

    /// Register a scene; the first one becomes current.
    pub fn with_scene(mut self, name: impl Into<String>, scene: SceneGraph) -> Result<Self> {
        self.storyboard.add_scene(name, scene)?;
        Ok(self)
    }

    pub fn set_pointer_sampler(&mut self, sampler: Option<Box<dyn PointerSampler>>) {
        self.sampler = sampler;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn context(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut FrameContext {
        &mut self.ctx
    }

    pub fn timeline(&self) -> &Timeline<TimedAction> {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline<TimedAction> {
        &mut self.timeline
    }

    pub fn scene(&self) -> Result<&SceneGraph> {
        self.storyboard.current().ok_or(EngineError::NoActiveScene)
    }

    /// The current scene together with the frame context, for building
    /// deferred edits outside of a frame.
    pub fn scene_and_context(&mut self) -> Result<(&mut SceneGraph, &mut FrameContext)> {
        let scene = self
            .storyboard
            .current_mut()
            .ok_or(EngineError::NoActiveScene)?;
        Ok((scene, &mut self.ctx))
    }

    pub fn storyboard(&self) -> &Storyboard {
        &self.storyboard
    }

    /// Register another scene. The first one becomes current.
    pub fn add_scene(&mut self, name: impl Into<String>, scene: SceneGraph) -> Result<()> {
        self.storyboard.add_scene(name, scene)
    }

    /// Switch scenes. Node ids are only meaningful inside the scene that
    /// issued them, so edits still queued for the previous scene are dropped.
    /// Timer edits belong to the engine and are kept.
    pub fn goto_scene(&mut self, name: &str) -> Result<()> {
        if self.storyboard.current_name() == Some(name) {
            return Ok(());
        }
        self.storyboard.goto_scene(name)?;
        self.discard_scene_edits();
        Ok(())
    }

    /// Removing the current scene leaves none current and drops its pending
    /// edits.
    pub fn remove_scene(&mut self, name: &str) -> Option<SceneGraph> {
        let was_current = self.storyboard.current_name() == Some(name);
        let scene = self.storyboard.remove_scene(name)?;
        if was_current {
            self.discard_scene_edits();
        }
        Some(scene)
    }

    fn discard_scene_edits(&mut self) {
        let mut dropped = 0;
        for action in self.ctx.take_deferred() {
            match action {
                DeferredAction::ScheduleTimer { .. } | DeferredAction::CancelTimer { .. } => {
                    self.ctx.defer(action)
                }
                other => {
                    debug!("engine: dropping {:?}", other);
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            warn!(
                "engine: dropped {} deferred edit(s) queued for the previous scene",
                dropped
            );
        }
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Advance one frame by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Result<FrameReport> {
        scheduler::run_frame(self, dt)
    }

    /// Render the current scene. Returns how many visuals were drawn.
    pub fn draw(&mut self, dt: f32, sink: &mut dyn RenderSink) -> Result<usize> {
        let scene = self
            .storyboard
            .current()
            .ok_or(EngineError::NoActiveScene)?;
        self.fps.tick(dt);
        Ok(scene.draw(sink))
    }

    /// Rate from the last completed second of draws.
    pub fn fps(&self) -> Option<f32> {
        self.fps.last()
    }

    /// Queue an edit for the end of the next update.
    pub fn register_deferred_action(&mut self, action: DeferredAction) {
        self.ctx.defer(action);
    }

    pub fn register_deferred_fn<F>(&mut self, f: F)
    where
        F: FnOnce(&mut SceneGraph, &mut FrameContext) + 'static,
    {
        self.ctx.defer_fn(f);
    }

    /// Run `action` once `delay` seconds of timeline time have passed.
    pub fn register_timed_action<F>(
        &mut self,
        delay: f32,
        action: F,
        comment: Option<&str>,
    ) -> RecordId
    where
        F: FnMut(&mut SceneGraph, &mut FrameContext) + 'static,
    {
        self.timeline.add(delay, Box::new(action), comment)
    }

    /// Returns `false` when the record already fired or was never issued.
    pub fn cancel_timed_action(&mut self, id: RecordId) -> bool {
        let removed = self.timeline.remove(id).is_some();
        if !removed {
            debug!("engine: timer {:?} not pending", id);
        }
        removed
    }
}
