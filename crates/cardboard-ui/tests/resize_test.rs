//! Container resizes while idle, mid-drag and with unusable geometry.

use cardboard_testing::SheetTestRule;
use cardboard_ui::{CardState, Size};

#[test]
fn idle_resize_resnaps_card() {
    let mut rule = SheetTestRule::new();
    rule.set_container_size(Size::new(390.0, 1000.0));
    assert_eq!(rule.card_origin(), 880.0);
    assert_eq!(rule.renderer().last(), Some(880.0));
    assert_eq!(rule.sheet().card_frame().height, 880.0);
}

#[test]
fn resize_mid_drag_retargets_transition() {
    let mut rule = SheetTestRule::new();
    rule.begin_drag();
    rule.drag_to(-400.0);
    // Halfway from 680 to 500.
    assert!((rule.card_origin() - 590.0).abs() < 1e-3);

    rule.set_container_size(Size::new(390.0, 1000.0));
    // Expanded is now at 700; halfway from 680.
    assert!((rule.card_origin() - 690.0).abs() < 1e-3);

    rule.end_drag();
    rule.pump_until_idle().expect("settles");
    assert_eq!(rule.current_state(), CardState::Expanded);
    assert_eq!(rule.card_origin(), 700.0);
}

#[test]
fn zero_height_keeps_last_good_origin() {
    let mut rule = SheetTestRule::new();
    rule.set_container_size(Size::new(390.0, 0.0));
    assert_eq!(rule.card_origin(), 680.0);

    rule.begin_drag();
    rule.drag_to(-80.0);
    assert_eq!(rule.card_origin(), 680.0);
}

#[test]
fn panel_changes_move_expanded_origin() {
    let mut rule = SheetTestRule::with_initial_state(
        cardboard_testing::DEFAULT_CONTAINER,
        cardboard_testing::DEFAULT_PANELS,
        cardboard_ui::SheetConfig::default(),
        CardState::Expanded,
    );
    assert_eq!(rule.card_origin(), 500.0);
    rule.set_panel_heights(cardboard_ui::PanelHeights::new(50.0, 150.0, 200.0));
    assert_eq!(rule.card_origin(), 600.0);
}
