//! Constant-speed motion along a chain of quadratic bezier segments.

use framekit_api_core::{FloatExt, Vec2};

use crate::deferred::DeferredAction;
use crate::error::{Result, SceneError};
use crate::object::DynamicObject;

use super::{steer, Behaviour, BehaviourContext};

/// Pieces used when the closed-form length is not usable.
const FALLBACK_STEPS: usize = 32;

/// One quadratic segment with its arclength precomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierSegment {
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    length: f32,
}

impl BezierSegment {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        let mut segment = Self {
            p0,
            p1,
            p2,
            length: 0.0,
        };
        segment.length = segment.compute_length();
        segment
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn start(&self) -> Vec2 {
        self.p0
    }

    pub fn end(&self) -> Vec2 {
        self.p2
    }

    /// Point at curve parameter `t` in `0..=1`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let a = self.p0 + (self.p1 - self.p0) * t;
        let b = self.p1 + (self.p2 - self.p1) * t;
        a + (b - a) * t
    }

    /// Point after travelling `distance` from the start.
    pub fn point_at_distance(&self, distance: f32) -> Vec2 {
        if self.length.is_almost_zero() {
            return self.p2;
        }
        self.point_at(distance / self.length)
    }

    fn compute_length(&self) -> f32 {
        let a = self.p0 - self.p1 * 2.0 + self.p2;
        let b = (self.p1 - self.p0) * 2.0;
        let aa = 4.0 * a.dot(a);
        let bb = 4.0 * a.dot(b);
        let cc = b.dot(b);
        if aa.is_almost_zero() {
            // middle point sits halfway: the curve is the chord
            return self.p0.distance(self.p2);
        }

        let sabc = 2.0 * (aa + bb + cc).sqrt();
        let a2 = aa.sqrt();
        let a32 = 2.0 * aa * a2;
        let c2 = 2.0 * cc.sqrt();
        let ba = bb / a2;
        let log_arg = (2.0 * a2 + ba + sabc) / (ba + c2);
        let length = (a32 * sabc
            + a2 * bb * (sabc - c2)
            + (4.0 * cc * aa - bb * bb) * log_arg.ln())
            / (4.0 * a32);

        if length.is_finite() && length >= 0.0 {
            length
        } else {
            // collinear control points with a fold back
            self.sampled_length()
        }
    }

    fn sampled_length(&self) -> f32 {
        let mut total = 0.0;
        let mut prev = self.p0;
        for i in 1..=FALLBACK_STEPS {
            let p = self.point_at(i as f32 / FALLBACK_STEPS as f32);
            total += prev.distance(p);
            prev = p;
        }
        total
    }
}

/// Moves the object through `points`, split into segments `[0,1,2]`,
/// `[2,3,4]` and so on. Speed comes from the object's momentum unless set
/// with [`BezierMovement::with_speed`].
#[derive(Clone, Debug)]
pub struct BezierMovement {
    points: Vec<Vec2>,
    current: usize,
    segment: Option<BezierSegment>,
    travelled: f32,
    last_point: Vec2,
    speed: Option<f32>,
    paused: bool,
    finished: bool,
}

impl BezierMovement {
    pub fn new(points: Vec<Vec2>) -> Result<Self> {
        if points.len() < 3 || points.len() % 2 == 0 {
            return Err(SceneError::InvalidCurve {
                points: points.len(),
            });
        }
        Ok(Self {
            last_point: points[0],
            points,
            current: 0,
            segment: None,
            travelled: 0.0,
            speed: None,
            paused: false,
            finished: false,
        })
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Run the curve backwards from the beginning.
    pub fn reverse(&mut self) {
        self.points.reverse();
        self.current = 0;
        self.segment = None;
        self.travelled = 0.0;
        self.last_point = self.points[0];
        self.finished = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn segment_at(&self, start: usize) -> BezierSegment {
        BezierSegment::new(
            self.points[start],
            self.points[start + 1],
            self.points[start + 2],
        )
    }
}

impl Behaviour for BezierMovement {
    fn update_object_state(&mut self, obj: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        let delta = ctx.delta();
        if self.finished || self.paused || delta.is_almost_zero() {
            return;
        }
        let speed = self.speed.unwrap_or_else(|| obj.speed());

        let mut segment = match self.segment {
            Some(segment) => segment,
            None => {
                obj.position = self.points[0];
                self.last_point = self.points[0];
                self.segment_at(0)
            }
        };

        self.travelled += speed * delta;
        while self.travelled >= segment.length() {
            if self.current + 4 > self.points.len() {
                self.finished = true;
                // land exactly on the end point this frame
                obj.momentum = (segment.end() - obj.position) / delta;
                ctx.defer(DeferredAction::SetMomentum {
                    node: ctx.node(),
                    momentum: Vec2::ZERO,
                });
                ctx.remove_behaviour::<Self>();
                return;
            }
            self.travelled -= segment.length();
            self.current += 2;
            segment = self.segment_at(self.current);
        }
        self.segment = Some(segment);

        let next = segment.point_at_distance(self.travelled);
        obj.momentum = steer(next - self.last_point, speed);
        self.last_point = next;
    }
}
