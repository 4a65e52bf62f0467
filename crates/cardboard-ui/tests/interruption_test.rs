//! Grabbing a running animation and letting go again must never make the
//! card jump.

use cardboard_testing::SheetTestRule;
use cardboard_ui::CardState;

// Largest per-frame move of a 500ms critically damped run over 180px.
const MAX_FRAME_STEP: f32 = 25.0;

#[test]
fn grabbing_a_running_animation_holds_the_card_in_place() {
    let mut rule = SheetTestRule::new();
    rule.sheet_mut().toggle().expect("toggle");
    for _ in 0..6 {
        rule.advance_frame();
    }
    let before = rule.card_origin();
    assert!(before < 680.0 && before > 500.0);

    rule.begin_drag();
    for _ in 0..5 {
        rule.advance_frame();
    }
    assert_eq!(rule.card_origin(), before);
    assert!(!rule.is_animating());
}

#[test]
fn reversing_a_running_animation_starts_from_the_live_origin() {
    let mut rule = SheetTestRule::new();
    rule.sheet_mut().toggle().expect("toggle");
    for _ in 0..8 {
        rule.advance_frame();
    }
    let grabbed_at = rule.card_origin();

    rule.begin_drag();
    rule.drag_to(12.0);
    assert_eq!(rule.card_origin(), grabbed_at);
    let transition = rule.sheet().transition().expect("live transition");
    assert!(transition.is_reset);
    assert_eq!(transition.start_origin, grabbed_at);

    rule.drag_to(60.0);
    assert!(rule.card_origin() > grabbed_at);

    rule.end_drag();
    rule.pump_until_idle().expect("settles");
    assert_eq!(rule.current_state(), CardState::Collapsed);
    assert_eq!(rule.card_origin(), 680.0);
}

#[test]
fn back_and_forth_dragging_never_jumps() {
    let mut rule = SheetTestRule::new();
    rule.begin_drag();
    let mut translation = 0.0;
    for step in [-10.0, -10.0, -10.0, 10.0, 10.0, 10.0, 10.0, -10.0, -10.0, -10.0, -10.0] {
        translation += step;
        rule.drag_to(translation);
    }
    rule.end_drag();
    for _ in 0..4 {
        rule.advance_frame();
    }

    // Grab again mid-flight and pull the other way.
    rule.begin_drag();
    for translation in [10.0, 20.0, 30.0, 40.0] {
        rule.drag_to(translation);
    }
    rule.end_drag();
    rule.pump_until_idle().expect("settles");

    let step = rule.renderer().max_step();
    assert!(step < MAX_FRAME_STEP, "card jumped {step}px");
    assert_eq!(rule.current_state(), CardState::Collapsed);
}

#[test]
fn only_one_transition_lives_through_a_gesture() {
    let mut rule = SheetTestRule::with_initial_state(
        cardboard_testing::DEFAULT_CONTAINER,
        cardboard_testing::DEFAULT_PANELS,
        cardboard_ui::SheetConfig::default(),
        CardState::Expanded,
    );
    rule.begin_drag();
    let mut ids = Vec::new();
    for translation in [-5.0, -30.0, 15.0, 45.0, -2.0, 0.0, 90.0] {
        rule.drag_to(translation);
        let transition = rule.sheet().transition().expect("live transition");
        assert!(transition.is_paused);
        assert!(!rule.is_animating());
        ids.push(transition.id);
    }
    rule.end_drag();
    assert!(rule.is_animating());
    rule.pump_until_idle().expect("settles");

    for pair in ids.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
    assert!(rule.sheet().transition().is_none());
}
