use framekit_scene_core::{DeferredAction, FrameContext, PointerSampler, SceneGraph, TimedAction};
use framekit_timeline_core::{RecordId, Timeline};
use log::{debug, error, trace};

use crate::error::{EngineError, Result};

/// Run one frame:
///   input -> timeline -> traversal -> deferred drain
pub fn run_frame(engine: &mut crate::Engine, dt: f32) -> Result<crate::FrameReport> {
    let crate::Engine {
        storyboard,
        timeline,
        ctx,
        sampler,
        frame,
        ..
    } = engine;
    let scene = storyboard
        .current_mut()
        .ok_or(EngineError::NoActiveScene)?;

    ctx.set_delta(dt);
    sample_input(ctx, sampler);
    let fired = fire_timeline(timeline, scene, ctx, dt);
    traverse(scene, ctx);
    *frame = frame.wrapping_add(1);
    let applied = drain_deferred(timeline, scene, ctx)?;

    Ok(crate::FrameReport {
        frame: *frame,
        dt,
        fired,
        applied,
    })
}

/// Replace last frame's touches with a fresh sample.
pub(crate) fn sample_input(
    ctx: &mut FrameContext,
    sampler: &mut Option<Box<dyn PointerSampler>>,
) {
    let points = sampler
        .as_mut()
        .map(|s| s.sample())
        .unwrap_or_default();
    ctx.touches.begin(points);
}

/// Fire at most one due timeline record.
pub(crate) fn fire_timeline(
    timeline: &mut Timeline<TimedAction>,
    scene: &mut SceneGraph,
    ctx: &mut FrameContext,
    dt: f32,
) -> Option<RecordId> {
    timeline.update(dt, |_, action| action(&mut *scene, &mut *ctx))
}

pub(crate) fn traverse(scene: &mut SceneGraph, ctx: &mut FrameContext) {
    scene.update(ctx);
}

/// Apply everything queued up to now. Edits queued while draining wait for
/// the next frame. A failing edit does not stop the drain; the first error
/// is returned once the queue is empty.
pub(crate) fn drain_deferred(
    timeline: &mut Timeline<TimedAction>,
    scene: &mut SceneGraph,
    ctx: &mut FrameContext,
) -> Result<usize> {
    let actions = ctx.take_deferred();
    let applied = actions.len();
    let mut first_err = None;
    for action in actions {
        trace!("drain: {:?}", action);
        match action {
            DeferredAction::ScheduleTimer {
                delay,
                action,
                comment,
            } => {
                timeline.add(delay, action, comment.as_deref());
            }
            DeferredAction::CancelTimer { id } => {
                if timeline.remove(id).is_none() {
                    debug!("drain: timer {:?} already gone", id);
                }
            }
            other => {
                let label = other.label();
                if let Err(err) = scene.apply(other, ctx) {
                    error!("deferred {} failed [{}]: {}", label, err.category(), err);
                    first_err.get_or_insert(err);
                }
            }
        }
    }
    match first_err {
        Some(err) => Err(err.into()),
        None => Ok(applied),
    }
}
