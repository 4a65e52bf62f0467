use super::*;
use crate::config::SheetConfig;
use crate::layout::StaticLayout;
use crate::position::PanelHeights;
use crate::state::CardStateMachine;
use cardboard_core::{DefaultScheduler, Runtime, FRAME_NANOS_60HZ};
use cardboard_ui_graphics::Size;
use std::rc::Rc;
use std::sync::Arc;

// Collapsed 680, Expanded 500, FullyExpanded 300.
const PANELS: PanelHeights = PanelHeights::new(100.0, 200.0, 200.0);

struct Fixture {
    runtime: Runtime,
    layout: Rc<StaticLayout>,
    coordinator: GestureCoordinator,
    now: u64,
}

impl Fixture {
    fn new(initial: CardState) -> Self {
        Self::with_panels(initial, PANELS)
    }

    fn with_panels(initial: CardState, panels: PanelHeights) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let layout = Rc::new(StaticLayout::new(Size::new(400.0, 800.0), panels));
        let controller = TransitionController::with_state_machine(
            runtime.handle(),
            layout.clone(),
            Rc::new(|_: f32| {}),
            SheetConfig::default(),
            CardStateMachine::new(initial),
        );
        Self {
            runtime,
            layout,
            coordinator: GestureCoordinator::new(controller),
            now: 0,
        }
    }

    fn controller(&self) -> &TransitionController {
        self.coordinator.controller()
    }

    fn drag(&mut self, translations: &[f32]) {
        self.coordinator.handle(DragEvent::began());
        for &translation in translations {
            self.coordinator.handle(DragEvent::changed(translation));
        }
    }

    fn release(&mut self) {
        self.coordinator.handle(DragEvent::ended(0.0));
    }

    fn frame(&mut self) {
        self.now += FRAME_NANOS_60HZ;
        self.runtime.handle().drain_frame_callbacks(self.now);
    }

    fn settle(&mut self) {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            assert!(frames < 1_000, "transition never settled");
            self.frame();
            frames += 1;
        }
    }

    fn progress(&self) -> Option<f32> {
        self.controller().transition().map(|transition| transition.progress)
    }
}

#[test]
fn began_starts_paused_transition_with_guess() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.drag(&[]);

    let transition = fixture.controller().transition().expect("transition");
    assert_eq!(transition.from, CardState::Collapsed);
    assert_eq!(transition.to, CardState::Expanded);
    assert!(transition.is_paused);
    assert!(!transition.is_reset);
    assert_eq!(fixture.coordinator.fraction_at_gesture_start(), 0.0);
    assert!(!fixture.runtime.handle().has_frame_callbacks());
}

#[test]
fn upward_drag_in_expanded_scrubs_toward_fully_expanded() {
    let mut fixture = Fixture::with_panels(
        CardState::Expanded,
        PanelHeights::new(40.0, 80.0, 200.0),
    );
    fixture.drag(&[-50.0]);

    let transition = fixture.controller().transition().expect("transition");
    assert_eq!(transition.to, CardState::FullyExpanded);
    assert!(!transition.is_reset);
    assert!((transition.progress - 0.0625).abs() < 1e-6);
}

#[test]
fn downward_drag_in_collapsed_resets_to_collapsed() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.drag(&[30.0]);

    let transition = fixture.controller().transition().expect("transition");
    assert!(transition.is_reset);
    assert_eq!(transition.rest_state(), CardState::Collapsed);

    fixture.release();
    fixture.settle();
    assert_eq!(fixture.controller().current_state(), CardState::Collapsed);
    assert_eq!(fixture.controller().position(), 680.0);
}

#[test]
fn upward_drag_in_fully_expanded_resets() {
    let mut fixture = Fixture::new(CardState::FullyExpanded);
    fixture.drag(&[-20.0, -60.0]);

    let transition = fixture.controller().transition().expect("transition");
    assert!(transition.is_reset);
    assert_eq!(transition.rest_state(), CardState::FullyExpanded);
    fixture.release();
    fixture.settle();
    assert_eq!(fixture.controller().current_state(), CardState::FullyExpanded);
}

#[test]
fn downward_drag_in_fully_expanded_heads_to_expanded() {
    let mut fixture = Fixture::new(CardState::FullyExpanded);
    fixture.drag(&[80.0]);

    let transition = fixture.controller().transition().expect("transition");
    assert_eq!(transition.to, CardState::Expanded);
    assert!((transition.progress - 0.1).abs() < 1e-6);
    fixture.release();
    fixture.settle();
    assert_eq!(fixture.controller().current_state(), CardState::Expanded);
}

#[test]
fn expanded_drag_follows_direction_and_updates_guess() {
    let mut fixture = Fixture::new(CardState::Expanded);
    fixture.drag(&[-40.0]);
    assert_eq!(
        fixture.controller().transition().map(|t| t.to),
        Some(CardState::FullyExpanded)
    );

    fixture.coordinator.handle(DragEvent::changed(40.0));
    let transition = fixture.controller().transition().expect("transition");
    assert_eq!(transition.to, CardState::Collapsed);
    assert!(!fixture.controller().state_machine().prefers_forward());

    fixture.release();
    fixture.settle();
    assert_eq!(fixture.controller().current_state(), CardState::Collapsed);
}

#[test]
fn restart_continues_from_live_position() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.drag(&[-160.0]);
    // 160 / 800 of the way from 680 to 500.
    assert!((fixture.controller().position() - 644.0).abs() < 1e-3);

    fixture.coordinator.handle(DragEvent::changed(20.0));
    let transition = fixture.controller().transition().expect("transition");
    assert!(transition.is_reset);
    assert!((transition.start_origin - 644.0).abs() < 1e-3);
    assert!((fixture.controller().position() - 644.0).abs() < 1e-3);
    assert!((fixture.coordinator.fraction_at_gesture_start() + 0.025).abs() < 1e-6);

    fixture.coordinator.handle(DragEvent::changed(100.0));
    assert!((fixture.progress().unwrap_or_default() - 0.1).abs() < 1e-6);
    assert!(fixture.controller().position() > 644.0);
}

#[test]
fn returning_to_a_consistent_direction_restarts_forward() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.drag(&[30.0, -10.0]);

    let transition = fixture.controller().transition().expect("transition");
    assert!(!transition.is_reset);
    assert_eq!(transition.to, CardState::Expanded);
}

#[test]
fn interrupting_a_running_transition_keeps_its_progress() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.drag(&[-80.0]);
    fixture.release();
    for _ in 0..5 {
        fixture.frame();
    }
    let before = fixture.controller().position();
    let progress = fixture.progress().expect("still running");

    fixture.drag(&[]);
    assert_eq!(fixture.coordinator.fraction_at_gesture_start(), progress);
    assert_eq!(fixture.controller().position(), before);

    fixture.coordinator.handle(DragEvent::changed(-8.0));
    let expected = (progress + 0.01).min(1.0);
    assert!((fixture.progress().unwrap_or_default() - expected).abs() < 1e-6);
}

#[test]
fn changed_without_began_begins_implicitly() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.coordinator.handle(DragEvent::changed(-80.0));

    assert!(fixture.coordinator.is_dragging());
    assert!((fixture.progress().unwrap_or_default() - 0.1).abs() < 1e-6);
}

#[test]
fn ended_without_began_is_ignored() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.release();
    assert!(fixture.controller().transition().is_none());
    assert!(!fixture.runtime.handle().has_frame_callbacks());
}

#[test]
fn empty_container_skips_scrub() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.drag(&[]);
    fixture.layout.set_container_size(Size::new(400.0, 0.0));
    fixture.coordinator.handle(DragEvent::changed(-80.0));
    assert_eq!(fixture.progress(), Some(0.0));
}

#[test]
fn drag_keeps_transitions_paused_until_release() {
    let mut fixture = Fixture::new(CardState::Expanded);
    fixture.coordinator.handle(DragEvent::began());
    for translation in [-10.0, -40.0, 0.0, 25.0, 90.0, -5.0, 300.0] {
        fixture.coordinator.handle(DragEvent::changed(translation));
        assert!(fixture.controller().has_transition());
        assert!(!fixture.runtime.handle().has_frame_callbacks());
    }

    fixture.release();
    assert!(fixture.runtime.handle().has_frame_callbacks());
    fixture.settle();
    assert_eq!(fixture.controller().current_state(), CardState::Collapsed);
    assert!(!fixture.controller().has_transition());
}

#[test]
fn stale_guess_in_expanded_still_tracks_the_finger() {
    let mut fixture = Fixture::with_panels(
        CardState::Expanded,
        PanelHeights::new(40.0, 80.0, 200.0),
    );
    fixture.controller().set_prefers_forward(false);
    fixture.drag(&[-50.0]);

    let transition = fixture.controller().transition().expect("transition");
    assert_eq!(transition.to, CardState::FullyExpanded);
    assert_eq!(fixture.coordinator.fraction_at_gesture_start(), 0.0);
    assert!((transition.progress - 0.0625).abs() < 1e-6);

    fixture.coordinator.handle(DragEvent::changed(-100.0));
    assert!((fixture.progress().unwrap_or_default() - 0.125).abs() < 1e-6);
    assert!((fixture.controller().position() - 655.0).abs() < 1e-3);
}

#[test]
fn reversing_a_reset_from_rest_keeps_the_full_travel() {
    let mut fixture = Fixture::new(CardState::Collapsed);
    fixture.drag(&[30.0]);
    assert!(fixture.controller().transition().is_some_and(|t| t.is_reset));
    assert_eq!(fixture.controller().position(), 680.0);

    fixture.coordinator.handle(DragEvent::changed(-40.0));
    let transition = fixture.controller().transition().expect("transition");
    assert!(!transition.is_reset);
    assert!((transition.progress - 0.05).abs() < 1e-6);
}
