//! Interpolation modes and the mode -> easing function lookup.

pub mod functions;

use core::convert::Infallible;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Signature shared by every easing function: `(min, max, t) -> value`.
pub type EasingFn = fn(f32, f32, f32) -> f32;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Linear,

    EaseInSoft,
    EaseOutSoft,
    EaseBothSoft,

    EaseInMedium,
    EaseOutMedium,
    EaseBothMedium,

    EaseInHard,
    EaseOutHard,
    EaseBothHard,

    BackIn,
    BackOut,
    BackBoth,

    SinePulse,
    SinePulseBack,

    Bounce,
    Elastic,
}

impl InterpolationMode {
    pub const ALL: [InterpolationMode; 17] = [
        InterpolationMode::Linear,
        InterpolationMode::EaseInSoft,
        InterpolationMode::EaseOutSoft,
        InterpolationMode::EaseBothSoft,
        InterpolationMode::EaseInMedium,
        InterpolationMode::EaseOutMedium,
        InterpolationMode::EaseBothMedium,
        InterpolationMode::EaseInHard,
        InterpolationMode::EaseOutHard,
        InterpolationMode::EaseBothHard,
        InterpolationMode::BackIn,
        InterpolationMode::BackOut,
        InterpolationMode::BackBoth,
        InterpolationMode::SinePulse,
        InterpolationMode::SinePulseBack,
        InterpolationMode::Bounce,
        InterpolationMode::Elastic,
    ];

    /// Pulse modes oscillate around their start value and end where they began.
    #[inline]
    pub fn is_pulse(self) -> bool {
        matches!(
            self,
            InterpolationMode::SinePulse | InterpolationMode::SinePulseBack
        )
    }

    /// Case-insensitive name lookup; unknown names resolve to `Linear`.
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            InterpolationMode::Linear => "Linear",
            InterpolationMode::EaseInSoft => "EaseInSoft",
            InterpolationMode::EaseOutSoft => "EaseOutSoft",
            InterpolationMode::EaseBothSoft => "EaseBothSoft",
            InterpolationMode::EaseInMedium => "EaseInMedium",
            InterpolationMode::EaseOutMedium => "EaseOutMedium",
            InterpolationMode::EaseBothMedium => "EaseBothMedium",
            InterpolationMode::EaseInHard => "EaseInHard",
            InterpolationMode::EaseOutHard => "EaseOutHard",
            InterpolationMode::EaseBothHard => "EaseBothHard",
            InterpolationMode::BackIn => "BackIn",
            InterpolationMode::BackOut => "BackOut",
            InterpolationMode::BackBoth => "BackBoth",
            InterpolationMode::SinePulse => "SinePulse",
            InterpolationMode::SinePulseBack => "SinePulseBack",
            InterpolationMode::Bounce => "Bounce",
            InterpolationMode::Elastic => "Elastic",
        }
    }
}

impl FromStr for InterpolationMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Raw easing function for a mode.
pub fn easing_for(mode: InterpolationMode) -> EasingFn {
    use InterpolationMode::*;
    match mode {
        Linear => functions::linear,
        EaseInSoft => functions::ease_in_soft,
        EaseOutSoft => functions::ease_out_soft,
        EaseBothSoft => functions::ease_both_soft,
        EaseInMedium => functions::ease_in_medium,
        EaseOutMedium => functions::ease_out_medium,
        EaseBothMedium => functions::ease_both_medium,
        EaseInHard => functions::ease_in_hard,
        EaseOutHard => functions::ease_out_hard,
        EaseBothHard => functions::ease_both_hard,
        BackIn => functions::back_in,
        BackOut => functions::back_out,
        BackBoth => functions::back_both,
        SinePulse => functions::sine_pulse,
        SinePulseBack => functions::sine_pulse_back,
        Bounce => functions::bounce,
        Elastic => functions::elastic,
    }
}

/// Evaluate `mode` at `t`, returning exact endpoints outside the open interval.
///
/// Bounded modes return `min` at `t <= 0` and `max` at `t >= 1`. Pulse modes
/// return their centre (`min`) at both ends.
pub fn ease(mode: InterpolationMode, min: f32, max: f32, t: f32) -> f32 {
    if t.is_nan() || t <= 0.0 {
        return min;
    }
    if t >= 1.0 {
        return if mode.is_pulse() { min } else { max };
    }
    easing_for(mode)(min, max, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_linear() {
        assert_eq!(InterpolationMode::from_name("wobble"), InterpolationMode::Linear);
        assert_eq!(InterpolationMode::from_name(""), InterpolationMode::Linear);
        assert_eq!(
            "easeinhard".parse::<InterpolationMode>().unwrap(),
            InterpolationMode::EaseInHard
        );
    }

    #[test]
    fn every_mode_has_distinct_name() {
        for m in InterpolationMode::ALL {
            assert_eq!(InterpolationMode::from_name(m.name()), m);
        }
    }

    #[test]
    fn ease_in_hard_is_quartic() {
        let f = easing_for(InterpolationMode::EaseInHard);
        assert!((f(0.0, 16.0, 0.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&InterpolationMode::BackBoth).unwrap();
        assert_eq!(json, "\"BackBoth\"");
    }
}
