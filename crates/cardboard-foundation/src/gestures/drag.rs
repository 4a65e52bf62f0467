//! Vertical drag recogniser.
//!
//! Turns a single pointer's down/move/up/cancel events into the three-phase
//! drag stream (`Began`, `Changed`, `Ended`) consumed by the sheet. The
//! reported translation is measured from the position where the drag was
//! recognised, so the first `Changed` starts near zero rather than at the
//! slop distance.

use cardboard_ui_graphics::Point;

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::pointer::{PointerEvent, PointerEventKind, PointerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Began,
    Changed,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub phase: DragPhase,
    /// Vertical distance from the drag's starting point; positive is downward.
    pub translation_y: f32,
}

impl DragEvent {
    pub fn began() -> Self {
        Self {
            phase: DragPhase::Began,
            translation_y: 0.0,
        }
    }

    pub fn changed(translation_y: f32) -> Self {
        Self {
            phase: DragPhase::Changed,
            translation_y,
        }
    }

    pub fn ended(translation_y: f32) -> Self {
        Self {
            phase: DragPhase::Ended,
            translation_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Pressed {
        pointer: PointerId,
        press: Point,
    },
    Dragging {
        pointer: PointerId,
        origin: Point,
        translation_y: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    state: DragState,
    slop: f32,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl DragGesture {
    pub fn new() -> Self {
        Self::with_slop(DRAG_THRESHOLD)
    }

    pub fn with_slop(slop: f32) -> Self {
        Self {
            state: DragState::Idle,
            slop: slop.max(0.0),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Feed one pointer event; returns the drag event it produced, if any.
    ///
    /// Only the pointer that pressed first is tracked. A cancelled pointer
    /// ends the drag like a release so the consumer never waits forever.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        match (self.state, event.kind) {
            (DragState::Idle, PointerEventKind::Down) => {
                self.state = DragState::Pressed {
                    pointer: event.id,
                    press: event.position,
                };
                None
            }
            (DragState::Pressed { pointer, press }, PointerEventKind::Move)
                if pointer == event.id =>
            {
                let travelled = event.position.offset_from(press).y;
                if travelled.abs() <= self.slop {
                    return None;
                }
                log::trace!("drag recognised after {travelled:.1}px");
                event.consume();
                self.state = DragState::Dragging {
                    pointer,
                    origin: event.position,
                    translation_y: 0.0,
                };
                Some(DragEvent::began())
            }
            (DragState::Pressed { pointer, .. }, kind) if kind.is_terminal() && pointer == event.id => {
                self.state = DragState::Idle;
                None
            }
            (
                DragState::Dragging {
                    pointer, origin, ..
                },
                PointerEventKind::Move,
            ) if pointer == event.id => {
                event.consume();
                let translation_y = event.position.offset_from(origin).y;
                self.state = DragState::Dragging {
                    pointer,
                    origin,
                    translation_y,
                };
                Some(DragEvent::changed(translation_y))
            }
            (
                DragState::Dragging {
                    pointer,
                    translation_y,
                    ..
                },
                kind,
            ) if kind.is_terminal() && pointer == event.id => {
                event.consume();
                self.state = DragState::Idle;
                Some(DragEvent::ended(translation_y))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(gesture: &mut DragGesture, events: &[PointerEvent]) -> Vec<DragEvent> {
        events
            .iter()
            .filter_map(|event| gesture.on_pointer_event(event))
            .collect()
    }

    #[test]
    fn small_movement_is_not_a_drag() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(100.0, 700.0),
                PointerEvent::moved(100.0, 705.0),
                PointerEvent::up(100.0, 705.0),
            ],
        );
        assert!(events.is_empty());
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn drag_reports_translation_from_recognition_point() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(100.0, 700.0),
                PointerEvent::moved(100.0, 690.0),
                PointerEvent::moved(100.0, 640.0),
                PointerEvent::moved(100.0, 600.0),
                PointerEvent::up(100.0, 600.0),
            ],
        );
        assert_eq!(
            events,
            vec![
                DragEvent::began(),
                DragEvent::changed(-50.0),
                DragEvent::changed(-90.0),
                DragEvent::ended(-90.0),
            ]
        );
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn cancel_ends_an_active_drag() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(0.0, 500.0),
                PointerEvent::moved(0.0, 520.0),
                PointerEvent::moved(0.0, 550.0),
                PointerEvent::cancel(0.0, 550.0),
            ],
        );
        assert_eq!(events.last(), Some(&DragEvent::ended(30.0)));
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(0.0, 500.0).with_id(1),
                PointerEvent::down(50.0, 500.0).with_id(2),
                PointerEvent::moved(50.0, 300.0).with_id(2),
                PointerEvent::moved(0.0, 480.0).with_id(1),
            ],
        );
        assert_eq!(events, vec![DragEvent::began()]);
    }

    #[test]
    fn recognised_moves_are_consumed() {
        let mut gesture = DragGesture::new();
        gesture.on_pointer_event(&PointerEvent::down(0.0, 500.0));
        let jitter = PointerEvent::moved(0.0, 503.0);
        gesture.on_pointer_event(&jitter);
        assert!(!jitter.is_consumed());

        let drag = PointerEvent::moved(0.0, 530.0);
        gesture.on_pointer_event(&drag);
        assert!(drag.is_consumed());
    }
}
