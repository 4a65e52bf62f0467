//! Maps the three-phase drag stream onto the transition controller.
//!
//! A drag never moves the card directly. It pauses the live transition and
//! scrubs its progress, so letting go simply resumes the same animation from
//! wherever the finger left it.

use cardboard_foundation::{DragEvent, DragPhase};

use crate::state::{CardState, TransitionDirection};
use crate::transition::{TransitionController, TransitionRequest};

pub struct GestureCoordinator {
    controller: TransitionController,
    fraction_at_gesture_start: f32,
    in_gesture: bool,
}

impl GestureCoordinator {
    pub fn new(controller: TransitionController) -> Self {
        Self {
            controller,
            fraction_at_gesture_start: 0.0,
            in_gesture: false,
        }
    }

    pub fn controller(&self) -> &TransitionController {
        &self.controller
    }

    pub fn fraction_at_gesture_start(&self) -> f32 {
        self.fraction_at_gesture_start
    }

    pub fn is_dragging(&self) -> bool {
        self.in_gesture
    }

    pub fn handle(&mut self, event: DragEvent) {
        match event.phase {
            DragPhase::Began => self.began(),
            DragPhase::Changed => self.changed(event.translation_y),
            DragPhase::Ended => self.ended(),
        }
    }

    fn began(&mut self) {
        self.in_gesture = true;
        if !self.controller.has_transition() {
            let machine = self.controller.state_machine();
            let request = TransitionRequest::new(machine.current(), machine.next_guess());
            if let Err(err) = self.controller.start(request) {
                log::warn!("drag could not start a transition: {err}");
                return;
            }
        }
        self.controller.pause();
        self.fraction_at_gesture_start = self
            .controller
            .transition()
            .map(|transition| transition.progress)
            .unwrap_or(0.0);
        log::trace!(
            "drag began at progress {:.3}",
            self.fraction_at_gesture_start
        );
    }

    fn changed(&mut self, translation_y: f32) {
        if !self.in_gesture {
            log::trace!("drag changed without began; beginning now");
            self.began();
        }
        let Some(live) = self.controller.transition() else {
            return;
        };

        let current = self.controller.current_state();
        let direction = TransitionDirection::from_translation(translation_y);
        let (to, is_reset) = match (current, direction) {
            (CardState::Collapsed, TransitionDirection::Backward)
            | (CardState::FullyExpanded, TransitionDirection::Forward) => {
                (current.next(true), true)
            }
            (CardState::Expanded, direction) => {
                self.controller.set_prefers_forward(direction.is_forward());
                (current.next(direction.is_forward()), false)
            }
            _ => (current.next(true), false),
        };

        let request = if is_reset {
            TransitionRequest::reset(current, to)
        } else {
            TransitionRequest::new(current, to)
        };
        if !live.follows(&request) && !self.restart(request, translation_y) {
            return;
        }

        let height = self.controller.container_size().height;
        if !height.is_finite() || height <= 0.0 {
            log::trace!("scrub skipped; container height {height}");
            return;
        }
        let progress =
            (translation_y.abs() / height + self.fraction_at_gesture_start).clamp(0.0, 1.0);
        self.controller.scrub(progress);
    }

    /// Swap the live transition for `request`, paused. Returns `false` when
    /// the new transition could not be started.
    fn restart(&mut self, request: TransitionRequest, translation_y: f32) -> bool {
        let position = self.controller.position();
        let at_rest = position == self.controller.resting_origin(request.from);
        self.controller.cancel_and_reset();
        if let Err(err) = self.controller.start(request) {
            log::warn!("drag could not restart the transition: {err}");
            return false;
        }
        self.controller.pause();
        let height = self.controller.container_size().height;
        // From rest the finger's whole travel maps onto the new route. Mid
        // flight the new route starts at the live origin, so the travel so far
        // is already spent and the scrub must start from 0.
        self.fraction_at_gesture_start = if at_rest || !(height.is_finite() && height > 0.0) {
            0.0
        } else {
            -translation_y.abs() / height
        };
        log::debug!(
            "drag restarted transition toward {:?} (reset: {}, from rest: {at_rest})",
            request.to,
            request.is_reset
        );
        true
    }

    fn ended(&mut self) {
        if !self.in_gesture {
            log::trace!("drag ended without began");
            return;
        }
        self.in_gesture = false;
        let factor = self.controller.config().resume_duration_factor;
        self.controller.resume(factor);
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
