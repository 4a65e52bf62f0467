//! The single live card transition.
//!
//! [`TransitionController`] owns at most one [`InterruptibleAnimator`] at a
//! time and maps its fraction onto the card's vertical origin. It is the only
//! writer of the card position and the only place that commits a new
//! [`CardState`] into the state machine.
//!
//! Every transition is tagged with an id. Frame events carry that id, so
//! progress from a transition that was cancelled or superseded never reaches
//! the card.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cardboard_animation::{AnimationSpec, AnimatorEvent, InterruptibleAnimator, Lerp};
use cardboard_core::RuntimeHandle;
use cardboard_ui_graphics::Size;

use crate::config::SheetConfig;
use crate::error::TransitionError;
use crate::layout::LayoutProvider;
use crate::position::PositionModel;
use crate::render::CardRenderer;
use crate::state::{CardState, CardStateMachine};

pub type TransitionId = u64;

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Ran to the end; the card rests in the carried state.
    Completed(CardState),
    /// Cancelled, superseded, or dropped together with its controller.
    Cancelled,
}

/// Parameters for [`TransitionController::start`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRequest {
    pub from: CardState,
    pub to: CardState,
    /// Drive the card back to `from` instead of forward to `to`.
    pub is_reset: bool,
    /// `None` uses the configured transition spec.
    pub spec: Option<AnimationSpec>,
}

impl TransitionRequest {
    pub fn new(from: CardState, to: CardState) -> Self {
        Self {
            from,
            to,
            is_reset: false,
            spec: None,
        }
    }

    pub fn reset(from: CardState, to: CardState) -> Self {
        Self {
            is_reset: true,
            ..Self::new(from, to)
        }
    }

    pub fn with_spec(mut self, spec: AnimationSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// The state the card rests in if this transition completes.
    pub fn rest_state(&self) -> CardState {
        if self.is_reset {
            self.from
        } else {
            self.to
        }
    }
}

/// Returned by `start`; reports the outcome once the transition has ended.
#[derive(Debug, Clone)]
pub struct TransitionHandle {
    id: TransitionId,
    outcome: Rc<Cell<Option<TransitionOutcome>>>,
}

impl TransitionHandle {
    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn outcome(&self) -> Option<TransitionOutcome> {
        self.outcome.get()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.get().is_some()
    }
}

/// Read-only view of the live transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub id: TransitionId,
    pub from: CardState,
    pub to: CardState,
    pub progress: f32,
    pub is_paused: bool,
    pub is_reset: bool,
    pub start_origin: f32,
    pub end_origin: f32,
}

impl Transition {
    pub fn rest_state(&self) -> CardState {
        if self.is_reset {
            self.from
        } else {
            self.to
        }
    }

    pub fn origin_at(&self, progress: f32) -> f32 {
        Lerp::lerp(&self.start_origin, &self.end_origin, progress)
    }

    /// Whether this transition runs the route `request` describes.
    pub fn follows(&self, request: &TransitionRequest) -> bool {
        self.from == request.from && self.to == request.to && self.is_reset == request.is_reset
    }
}

type CompletionCallback = Box<dyn FnOnce(TransitionOutcome)>;

struct CompletionSlot {
    outcome: Rc<Cell<Option<TransitionOutcome>>>,
    callback: Option<CompletionCallback>,
}

impl CompletionSlot {
    fn resolve(&mut self, outcome: TransitionOutcome) {
        if self.outcome.get().is_some() {
            return;
        }
        self.outcome.set(Some(outcome));
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

struct ActiveTransition {
    id: TransitionId,
    request: TransitionRequest,
    start_origin: f32,
    end_origin: f32,
    animator: InterruptibleAnimator,
    completion: CompletionSlot,
}

impl ActiveTransition {
    fn origin_at(&self, progress: f32) -> f32 {
        Lerp::lerp(&self.start_origin, &self.end_origin, progress)
    }

    fn snapshot(&self) -> Transition {
        Transition {
            id: self.id,
            from: self.request.from,
            to: self.request.to,
            progress: self.animator.fraction_complete(),
            is_paused: self.animator.is_paused(),
            is_reset: self.request.is_reset,
            start_origin: self.start_origin,
            end_origin: self.end_origin,
        }
    }
}

// Always dropped outside the controller borrow: the completion callback may
// call back into the controller.
impl Drop for ActiveTransition {
    fn drop(&mut self) {
        self.animator.stop();
        self.completion.resolve(TransitionOutcome::Cancelled);
    }
}

struct ControllerInner {
    runtime: RuntimeHandle,
    config: SheetConfig,
    layout: Rc<dyn LayoutProvider>,
    renderer: Rc<dyn CardRenderer>,
    machine: CardStateMachine,
    positions: PositionModel,
    position: f32,
    active: Option<ActiveTransition>,
    next_id: TransitionId,
}

impl ControllerInner {
    fn origin_of(&mut self, state: CardState) -> f32 {
        let height = self.layout.container_size().height;
        let panels = self.layout.panel_heights();
        self.positions.origin(state, height, panels)
    }
}

/// Owner of the live transition and of the card position.
///
/// The layout provider is read while the controller is borrowed and must not
/// call back into it. Renderers and completion callbacks may.
#[derive(Clone)]
pub struct TransitionController {
    inner: Rc<RefCell<ControllerInner>>,
}

impl TransitionController {
    pub fn new(
        runtime: RuntimeHandle,
        layout: Rc<dyn LayoutProvider>,
        renderer: Rc<dyn CardRenderer>,
        config: SheetConfig,
    ) -> Self {
        Self::with_state_machine(runtime, layout, renderer, config, CardStateMachine::default())
    }

    pub fn with_state_machine(
        runtime: RuntimeHandle,
        layout: Rc<dyn LayoutProvider>,
        renderer: Rc<dyn CardRenderer>,
        config: SheetConfig,
        machine: CardStateMachine,
    ) -> Self {
        let mut inner = ControllerInner {
            runtime,
            config,
            layout,
            renderer,
            machine,
            positions: PositionModel::new(config.collapsed_reveal),
            position: 0.0,
            active: None,
            next_id: 1,
        };
        inner.position = inner.origin_of(machine.current());
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn config(&self) -> SheetConfig {
        self.inner.borrow().config
    }

    pub fn container_size(&self) -> Size {
        self.inner.borrow().layout.container_size()
    }

    /// Live vertical origin of the card.
    pub fn position(&self) -> f32 {
        self.inner.borrow().position
    }

    /// Where the card rests in `state` under the current geometry.
    pub fn resting_origin(&self, state: CardState) -> f32 {
        self.inner.borrow_mut().origin_of(state)
    }

    pub fn current_state(&self) -> CardState {
        self.inner.borrow().machine.current()
    }

    pub fn state_machine(&self) -> CardStateMachine {
        self.inner.borrow().machine
    }

    pub fn set_prefers_forward(&self, prefers_forward: bool) {
        self.inner
            .borrow_mut()
            .machine
            .set_prefers_forward(prefers_forward);
    }

    pub fn transition(&self) -> Option<Transition> {
        self.inner
            .borrow()
            .active
            .as_ref()
            .map(ActiveTransition::snapshot)
    }

    pub fn has_transition(&self) -> bool {
        self.inner.borrow().active.is_some()
    }

    /// Start a transition without a completion callback.
    pub fn start(&self, request: TransitionRequest) -> Result<TransitionHandle, TransitionError> {
        self.start_internal(request, None)
    }

    /// Start a transition; `on_complete` fires exactly once with its outcome.
    pub fn start_with(
        &self,
        request: TransitionRequest,
        on_complete: impl FnOnce(TransitionOutcome) + 'static,
    ) -> Result<TransitionHandle, TransitionError> {
        self.start_internal(request, Some(Box::new(on_complete)))
    }

    fn start_internal(
        &self,
        request: TransitionRequest,
        callback: Option<CompletionCallback>,
    ) -> Result<TransitionHandle, TransitionError> {
        let TransitionRequest { from, to, .. } = request;
        debug_assert!(
            from.is_adjacent(to),
            "non-adjacent transition requested: {from:?} -> {to:?}"
        );
        if !from.is_adjacent(to) {
            log::warn!("rejecting non-adjacent transition {from:?} -> {to:?}");
            return Err(TransitionError::NonAdjacent { from, to });
        }

        let (animator, handle) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(active) = inner.active.as_ref() {
                log::warn!(
                    "start {from:?} -> {to:?} rejected; transition #{} is live",
                    active.id
                );
                return Err(TransitionError::AlreadyRunning);
            }

            let id = inner.next_id;
            inner.next_id += 1;
            let spec = request.spec.unwrap_or(inner.config.transition_spec);
            let start_origin = inner.position;
            let end_origin = inner.origin_of(request.rest_state());

            let animator = InterruptibleAnimator::new(spec, inner.runtime.clone());
            let weak = Rc::downgrade(&self.inner);
            animator.set_listener(move |event| {
                if let Some(strong) = weak.upgrade() {
                    Self::on_animator_event(&strong, id, event);
                }
            });

            let outcome = Rc::new(Cell::new(None));
            inner.active = Some(ActiveTransition {
                id,
                request: TransitionRequest {
                    spec: Some(spec),
                    ..request
                },
                start_origin,
                end_origin,
                animator: animator.clone(),
                completion: CompletionSlot {
                    outcome: outcome.clone(),
                    callback,
                },
            });
            log::debug!(
                "transition #{id} {from:?} -> {to:?} (reset: {}) origin {start_origin:.1} -> {end_origin:.1} over {}ms",
                request.is_reset,
                spec.duration_millis
            );
            (animator, TransitionHandle { id, outcome })
        };
        animator.start();
        Ok(handle)
    }

    /// Freeze automatic advancement. Idempotent.
    pub fn pause(&self) {
        match self.live_animator() {
            Some((_, animator)) => animator.pause(),
            None => log::trace!("pause ignored: no live transition"),
        }
    }

    /// Jump the paused transition to `progress`, clamped to `[0, 1]`.
    /// Returns `false` when there is nothing paused to scrub.
    pub fn scrub(&self, progress: f32) -> bool {
        let Some((id, animator)) = self.live_animator() else {
            log::trace!("scrub ignored: no live transition");
            return false;
        };
        match animator.set_fraction_complete(progress) {
            Some(applied) => {
                Self::apply_progress(&self.inner, id, applied);
                true
            }
            None => false,
        }
    }

    /// Let a paused transition run to completion.
    ///
    /// A `duration_factor` of 0 finishes in `(1 - progress) * duration`; a
    /// positive factor finishes in `duration_factor * duration`.
    pub fn resume(&self, duration_factor: f32) -> bool {
        match self.live_animator() {
            Some((_, animator)) => animator.continue_animation(duration_factor),
            None => {
                log::trace!("resume ignored: no live transition");
                false
            }
        }
    }

    /// Discard the live transition without committing anything. The card
    /// stays where the last applied progress put it.
    pub fn cancel_and_reset(&self) -> bool {
        let active = self.inner.borrow_mut().active.take();
        match active {
            Some(active) => {
                log::debug!(
                    "transition #{} cancelled at progress {:.3}",
                    active.id,
                    active.animator.fraction_complete()
                );
                drop(active);
                true
            }
            None => false,
        }
    }

    /// Re-read geometry. A live transition is retargeted and re-applied at
    /// its current progress; an idle card snaps to its state's origin.
    pub fn relayout(&self) {
        let (renderer, origin) = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            let live = inner
                .active
                .as_ref()
                .map(|active| (active.request.rest_state(), active.animator.fraction_complete()));
            let origin = match live {
                Some((rest, progress)) => {
                    let end_origin = inner.origin_of(rest);
                    match inner.active.as_mut() {
                        Some(active) => {
                            active.end_origin = end_origin;
                            active.origin_at(progress)
                        }
                        None => end_origin,
                    }
                }
                None => {
                    let current = inner.machine.current();
                    inner.origin_of(current)
                }
            };
            inner.position = origin;
            (inner.renderer.clone(), origin)
        };
        log::trace!("relayout placed card at {origin:.1}");
        renderer.set_card_origin(origin);
    }

    fn live_animator(&self) -> Option<(TransitionId, InterruptibleAnimator)> {
        self.inner
            .borrow()
            .active
            .as_ref()
            .map(|active| (active.id, active.animator.clone()))
    }

    fn on_animator_event(this: &Rc<RefCell<ControllerInner>>, id: TransitionId, event: AnimatorEvent) {
        match event {
            AnimatorEvent::Progress(progress) => Self::apply_progress(this, id, progress),
            AnimatorEvent::Completed => Self::finish(this, id),
        }
    }

    fn apply_progress(this: &Rc<RefCell<ControllerInner>>, id: TransitionId, progress: f32) {
        let (renderer, origin) = {
            let mut inner = this.borrow_mut();
            let origin = match inner.active.as_ref() {
                Some(active) if active.id == id => active.origin_at(progress),
                _ => {
                    log::trace!("dropping progress {progress:.3} of stale transition #{id}");
                    return;
                }
            };
            inner.position = origin;
            (inner.renderer.clone(), origin)
        };
        renderer.set_card_origin(origin);
    }

    fn finish(this: &Rc<RefCell<ControllerInner>>, id: TransitionId) {
        let mut active = {
            let mut inner = this.borrow_mut();
            match inner.active.as_ref() {
                Some(active) if active.id == id => {}
                _ => return,
            }
            let Some(active) = inner.active.take() else {
                return;
            };
            if !active.request.is_reset {
                inner.machine.commit(active.request.to);
            }
            active
        };
        let rest = active.request.rest_state();
        log::debug!("transition #{id} completed; card rests {rest:?}");
        active.completion.resolve(TransitionOutcome::Completed(rest));
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
