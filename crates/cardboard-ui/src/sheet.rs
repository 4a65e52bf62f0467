//! The card sheet: pointer input, transitions and geometry behind one handle.

use std::rc::Rc;

use cardboard_core::RuntimeHandle;
use cardboard_foundation::{DragEvent, DragGesture, PointerEvent, PointerEventKind};
use cardboard_ui_graphics::{Point, Rect, Size};

use crate::config::SheetConfig;
use crate::error::TransitionError;
use crate::gesture::GestureCoordinator;
use crate::layout::LayoutProvider;
use crate::render::CardRenderer;
use crate::state::{CardState, CardStateMachine};
use crate::transition::{
    Transition, TransitionController, TransitionHandle, TransitionOutcome, TransitionRequest,
};

pub struct CardSheet {
    coordinator: GestureCoordinator,
    drag: DragGesture,
}

impl CardSheet {
    /// Create a collapsed sheet and place the card at its collapsed origin.
    pub fn new(
        runtime: RuntimeHandle,
        layout: Rc<dyn LayoutProvider>,
        renderer: Rc<dyn CardRenderer>,
        config: SheetConfig,
    ) -> Self {
        Self::with_initial_state(runtime, layout, renderer, config, CardState::Collapsed)
    }

    pub fn with_initial_state(
        runtime: RuntimeHandle,
        layout: Rc<dyn LayoutProvider>,
        renderer: Rc<dyn CardRenderer>,
        config: SheetConfig,
        initial: CardState,
    ) -> Self {
        let controller = TransitionController::with_state_machine(
            runtime,
            layout,
            renderer,
            config,
            CardStateMachine::new(initial),
        );
        controller.relayout();
        Self {
            coordinator: GestureCoordinator::new(controller),
            drag: DragGesture::new(),
        }
    }

    pub fn controller(&self) -> &TransitionController {
        self.coordinator.controller()
    }

    pub fn current_state(&self) -> CardState {
        self.controller().current_state()
    }

    pub fn card_origin(&self) -> f32 {
        self.controller().position()
    }

    pub fn transition(&self) -> Option<Transition> {
        self.controller().transition()
    }

    pub fn is_dragging(&self) -> bool {
        self.coordinator.is_dragging()
    }

    /// Feed a raw pointer event through the drag recogniser.
    /// Returns the drag event it produced, if any.
    ///
    /// Only presses that land on the card can start a drag.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        if event.kind == PointerEventKind::Down
            && !self.card_frame().contains(event.position.x, event.position.y)
        {
            log::trace!("press at {:?} missed the card", event.position);
            return None;
        }
        let drag = self.drag.on_pointer_event(event)?;
        self.coordinator.handle(drag);
        Some(drag)
    }

    /// Feed an already recognised drag event.
    pub fn handle_drag_event(&mut self, event: DragEvent) {
        self.coordinator.handle(event);
    }

    /// Animate to the state the card would move to next, as a tap would.
    pub fn toggle(&mut self) -> Result<TransitionHandle, TransitionError> {
        let target = self.controller().state_machine().next_guess();
        self.animate_to(target)
    }

    /// Animate to a neighbouring state.
    pub fn animate_to(&mut self, target: CardState) -> Result<TransitionHandle, TransitionError> {
        self.animate_to_with(target, |_| {})
    }

    pub fn animate_to_with(
        &mut self,
        target: CardState,
        on_complete: impl FnOnce(TransitionOutcome) + 'static,
    ) -> Result<TransitionHandle, TransitionError> {
        let current = self.current_state();
        if !current.is_adjacent(target) {
            return Err(TransitionError::NonAdjacent {
                from: current,
                to: target,
            });
        }
        self.controller()
            .start_with(TransitionRequest::new(current, target), on_complete)
    }

    /// Re-read geometry after the container changed size.
    pub fn on_container_resized(&mut self) {
        self.controller().relayout();
    }

    /// The card's frame: full container width, height of the container minus
    /// the collapsed reveal, top edge at the live origin.
    pub fn card_frame(&self) -> Rect {
        let controller = self.controller();
        let container = controller.container_size();
        let reveal = controller.config().collapsed_reveal;
        Rect::from_origin_size(
            Point::new(0.0, controller.position()),
            Size::new(container.width.max(0.0), (container.height - reveal).max(0.0)),
        )
    }
}

#[cfg(test)]
#[path = "tests/sheet_tests.rs"]
mod tests;
