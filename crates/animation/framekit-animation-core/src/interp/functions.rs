//! Easing functions.
//!
//! Every function maps `(min, max, t)` with `t` in `0..=1` to a value. The
//! pulse variants treat `min` as the centre and `max` as the amplitude.
//! These are the raw curves; [`crate::interp::ease`] adds the boundary guards.

use core::f32::consts::{FRAC_PI_2, PI, TAU};

use framekit_api_core::FloatExt;

const BACK_S1: f32 = 1.70158;
const BACK_S2: f32 = 2.59491;

const BOUNCE_SPAN: f32 = 2.75;
const BOUNCE_WEIGHT: f32 = 7.5625;

#[inline]
pub fn linear(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}

#[inline]
pub fn ease_in_soft(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t * t
}

#[inline]
pub fn ease_out_soft(min: f32, max: f32, t: f32) -> f32 {
    min - (max - min) * t * (t - 2.0)
}

pub fn ease_both_soft(min: f32, max: f32, t: f32) -> f32 {
    let d = max - min;
    let t = t * 2.0;
    if t < 1.0 {
        return min + d * 0.5 * t * t;
    }
    let t = t - 1.0;
    min - d * 0.5 * (t * (t - 2.0) - 1.0)
}

#[inline]
pub fn ease_in_medium(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t * t * t
}

#[inline]
pub fn ease_out_medium(min: f32, max: f32, t: f32) -> f32 {
    let t = t - 1.0;
    min + (max - min) * (t * t * t + 1.0)
}

pub fn ease_both_medium(min: f32, max: f32, t: f32) -> f32 {
    let d = max - min;
    let t = t * 2.0;
    if t < 1.0 {
        return min + d * 0.5 * t * t * t;
    }
    let t = t - 2.0;
    min + d * 0.5 * (t * t * t + 2.0)
}

#[inline]
pub fn ease_in_hard(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t * t * t * t
}

#[inline]
pub fn ease_out_hard(min: f32, max: f32, t: f32) -> f32 {
    let t = t - 1.0;
    min - (max - min) * (t * t * t * t - 1.0)
}

pub fn ease_both_hard(min: f32, max: f32, t: f32) -> f32 {
    let d = max - min;
    let t = t * 2.0;
    if t < 1.0 {
        return min + d * 0.5 * t * t * t * t;
    }
    let t = t - 2.0;
    min - d * 0.5 * (t * t * t * t - 2.0)
}

pub fn back_in(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t * t * ((BACK_S1 + 1.0) * t - BACK_S1)
}

pub fn back_out(min: f32, max: f32, t: f32) -> f32 {
    let t = t - 1.0;
    min + (max - min) * (t * t * ((BACK_S1 + 1.0) * t + BACK_S1) + 1.0)
}

pub fn back_both(min: f32, max: f32, t: f32) -> f32 {
    let d = max - min;
    let t = t * 2.0;
    if t < 1.0 {
        return min + d * 0.5 * (t * t * ((BACK_S2 + 1.0) * t - BACK_S2));
    }
    let t = t - 2.0;
    min + d * 0.5 * (t * t * ((BACK_S2 + 1.0) * t + BACK_S2) + 2.0)
}

/// Elastic ease-out; exact at both ends to avoid the decaying sine residue.
pub fn elastic(min: f32, max: f32, t: f32) -> f32 {
    if t.is_almost_zero() {
        return min;
    }
    if t.is_almost(1.0) {
        return max;
    }
    let d = max - min;
    max + d * 2f32.powf(-10.0 * t) * (4.666 * PI * t - FRAC_PI_2).sin()
}

/// Four-segment bounce ease-out.
pub fn bounce(min: f32, max: f32, t: f32) -> f32 {
    let d = max - min;
    if t < 1.0 / BOUNCE_SPAN {
        return min + d * t * t * BOUNCE_WEIGHT;
    }
    if t < 2.0 / BOUNCE_SPAN {
        let t = t - 1.5 / BOUNCE_SPAN;
        return min + d * (t * t * BOUNCE_WEIGHT + 0.75);
    }
    if t < 2.5 / BOUNCE_SPAN {
        let t = t - 2.25 / BOUNCE_SPAN;
        return min + d * (t * t * BOUNCE_WEIGHT + 0.9375);
    }
    let t = t - 2.625 / BOUNCE_SPAN;
    min + d * (t * t * BOUNCE_WEIGHT + 0.984375)
}

#[inline]
pub fn sine_pulse(center: f32, amount: f32, t: f32) -> f32 {
    center + (TAU * t).sin() * amount
}

#[inline]
pub fn sine_pulse_back(center: f32, amount: f32, t: f32) -> f32 {
    center - (TAU * t).sin() * amount
}
