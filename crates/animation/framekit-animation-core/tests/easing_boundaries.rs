use framekit_animation_core::{ease, easing_for, InterpolationMode};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn bounded_modes_hit_both_endpoints() {
    let ranges = [(0.0f32, 1.0f32), (-3.0, 7.5), (10.0, -10.0), (2.0, 2.0)];
    for mode in InterpolationMode::ALL {
        for (min, max) in ranges {
            assert_eq!(ease(mode, min, max, 0.0), min, "{mode:?} at t=0");
            let end = ease(mode, min, max, 1.0);
            if mode.is_pulse() {
                assert_eq!(end, min, "{mode:?} pulse returns to centre");
            } else {
                assert_eq!(end, max, "{mode:?} at t=1");
            }
        }
    }
}

#[test]
fn raw_curves_are_close_to_endpoints_too() {
    for mode in InterpolationMode::ALL {
        if mode.is_pulse() {
            continue;
        }
        let f = easing_for(mode);
        approx(f(-3.0, 7.5, 0.0), -3.0, 1e-4);
        approx(f(-3.0, 7.5, 1.0), 7.5, 1e-4);
    }
}

#[test]
fn pulses_return_to_centre_at_raw_boundaries() {
    for mode in [InterpolationMode::SinePulse, InterpolationMode::SinePulseBack] {
        let f = easing_for(mode);
        approx(f(4.0, 2.0, 0.0), 4.0, 1e-4);
        approx(f(4.0, 2.0, 1.0), 4.0, 1e-4);
    }
}

#[test]
fn out_of_range_t_is_clamped() {
    assert_eq!(ease(InterpolationMode::Elastic, 0.0, 5.0, -1.0), 0.0);
    assert_eq!(ease(InterpolationMode::BackOut, 0.0, 5.0, 1.5), 5.0);
    assert_eq!(ease(InterpolationMode::Linear, 0.0, 5.0, f32::NAN), 0.0);
}

#[test]
fn monotonic_power_curves() {
    for mode in [
        InterpolationMode::Linear,
        InterpolationMode::EaseInSoft,
        InterpolationMode::EaseOutMedium,
        InterpolationMode::EaseBothHard,
    ] {
        let mut last = ease(mode, 0.0, 1.0, 0.0);
        for i in 1..=100 {
            let v = ease(mode, 0.0, 1.0, i as f32 / 100.0);
            assert!(v >= last - 1e-6, "{mode:?} decreased at step {i}");
            last = v;
        }
    }
}
