use approx::assert_relative_eq;
use framekit_animation_core::{InterpolationMode, PropertyAnimator};
use framekit_api_core::{Color, Vec2};

#[test]
fn linear_position_scenario() {
    let mut a = PropertyAnimator::new(
        Vec2::ZERO,
        Vec2::new(100.0, 0.0),
        2.0,
        InterpolationMode::Linear,
    )
    .unwrap();
    let mut pos = Vec2::ZERO;
    for _ in 0..4 {
        pos = a.advance(0.25).unwrap().value;
    }
    assert_relative_eq!(pos.x, 50.0, epsilon = 1e-4);
    assert!(!a.is_finished());

    for _ in 0..4 {
        pos = a.advance(0.25).unwrap().value;
    }
    assert_eq!(pos.x, 100.0);
    assert!(a.is_finished());
}

#[test]
fn post_completion_updates_are_noops() {
    let mut a = PropertyAnimator::new(0.0f32, 1.0, 0.5, InterpolationMode::Bounce).unwrap();
    let mut completions = 0;
    for _ in 0..10 {
        if let Some(step) = a.advance(0.2) {
            if step.completed {
                completions += 1;
                assert_eq!(step.value, 1.0);
            }
        }
    }
    assert_eq!(completions, 1);
    assert!(a.advance(0.2).is_none());
    assert_eq!(a.elapsed(), a.duration());
}

#[test]
fn skip_then_update_changes_nothing() {
    let mut a = PropertyAnimator::new(Color::WHITE, Color::BLACK, 1.0, InterpolationMode::EaseOutSoft)
        .unwrap();
    a.advance(0.3);
    assert_eq!(a.skip(), Some(Color::BLACK));
    assert!(a.is_finished());
    assert!(a.advance(0.3).is_none());
    assert!(a.skip().is_none());
}

#[test]
fn skip_with_animate_back_yields_initial() {
    let mut a = PropertyAnimator::new(1.0f32, 2.0, 1.0, InterpolationMode::Linear)
        .unwrap()
        .with_animate_back(true);
    a.advance(0.5);
    assert_eq!(a.skip(), Some(1.0));
}

#[test]
fn animate_back_round_trip() {
    let mut fwd = PropertyAnimator::new(3.0f32, 9.0, 1.0, InterpolationMode::EaseBothMedium)
        .unwrap()
        .with_animate_back(true);
    let mut value = 3.0;
    let mut back = None;
    while let Some(step) = fwd.advance(0.1) {
        value = step.value;
        if step.completed && fwd.wants_revert() {
            back = Some(fwd.reversed());
        }
    }
    assert_eq!(value, 9.0);
    let mut back = back.expect("revert scheduled");
    while let Some(step) = back.advance(0.1) {
        value = step.value;
    }
    assert_relative_eq!(value, 3.0, epsilon = 1e-4);
}

#[test]
fn paused_animator_holds_its_place() {
    let mut a = PropertyAnimator::new(0.0f32, 10.0, 1.0, InterpolationMode::Linear).unwrap();
    assert!(a.advance(0.25).is_some());
    a.set_paused(true);
    assert!(a.advance(0.5).is_none());
    assert_relative_eq!(a.elapsed(), 0.25);
    assert!(!a.is_finished());

    a.set_paused(false);
    let step = a.advance(0.25).unwrap();
    assert_relative_eq!(step.value, 5.0, epsilon = 1e-5);
}
