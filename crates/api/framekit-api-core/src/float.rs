//! Epsilon comparisons used by every degenerate-numeric guard in the engine.

/// Tolerance for "almost equal" float checks.
pub const EPSILON: f32 = 0.0001;

pub trait FloatExt {
    fn is_almost_zero(self) -> bool;
    fn is_almost(self, other: Self) -> bool;
}

impl FloatExt for f32 {
    #[inline]
    fn is_almost_zero(self) -> bool {
        self.abs() < EPSILON
    }

    #[inline]
    fn is_almost(self, other: f32) -> bool {
        (self - other).abs() < EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerances() {
        assert!(0.00005f32.is_almost_zero());
        assert!(!0.001f32.is_almost_zero());
        assert!(1.00002f32.is_almost(1.0));
        assert!(!f32::NAN.is_almost_zero());
    }
}
