//! Frame-driven progress animator that can be interrupted at any frame.
//!
//! The animator advances a fraction from 0 to 1. While running, every drained
//! frame eases the fraction forward and reports it to the listener. The owner
//! can pause it, set the fraction directly while paused, and continue toward 1
//! with a new duration. This is the timing half of an interactive transition;
//! what the fraction means is up to the listener.

use std::cell::RefCell;
use std::rc::Rc;

use cardboard_core::{FrameCallbackRegistration, RuntimeHandle};
use smallvec::SmallVec;

use crate::spec::AnimationSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Created, never started.
    Idle,
    Running,
    Paused,
    /// Reached fraction 1 through frame advancement.
    Completed,
    /// Stopped by its owner before completing.
    Stopped,
}

impl AnimatorState {
    pub fn is_finished(&self) -> bool {
        matches!(self, AnimatorState::Completed | AnimatorState::Stopped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorEvent {
    /// The fraction advanced on a frame.
    Progress(f32),
    /// The fraction reached 1 on a frame. Delivered at most once.
    Completed,
}

type Listener = Rc<dyn Fn(AnimatorEvent)>;

#[derive(Debug, Clone, Copy)]
struct Segment {
    from_fraction: f32,
    duration_nanos: u64,
    delay_nanos: u64,
    started_at_nanos: Option<u64>,
}

impl Segment {
    fn idle() -> Self {
        Self {
            from_fraction: 0.0,
            duration_nanos: 0,
            delay_nanos: 0,
            started_at_nanos: None,
        }
    }
}

pub struct InterruptibleAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
}

struct AnimatorInner {
    runtime: RuntimeHandle,
    spec: AnimationSpec,
    state: AnimatorState,
    fraction: f32,
    segment: Segment,
    registration: Option<FrameCallbackRegistration>,
    listener: Option<Listener>,
}

impl InterruptibleAnimator {
    pub fn new(spec: AnimationSpec, runtime: RuntimeHandle) -> Self {
        let inner = AnimatorInner {
            runtime,
            spec,
            state: AnimatorState::Idle,
            fraction: 0.0,
            segment: Segment::idle(),
            registration: None,
            listener: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Install the frame listener. Synchronous calls (`pause`,
    /// `set_fraction_complete`, `stop`) never invoke it.
    pub fn set_listener(&self, listener: impl Fn(AnimatorEvent) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    pub fn spec(&self) -> AnimationSpec {
        self.inner.borrow().spec
    }

    pub fn state(&self) -> AnimatorState {
        self.inner.borrow().state
    }

    pub fn fraction_complete(&self) -> f32 {
        self.inner.borrow().fraction
    }

    pub fn is_running(&self) -> bool {
        self.state() == AnimatorState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state() == AnimatorState::Paused
    }

    /// Begin advancing from 0 over the spec's delay and duration.
    /// Returns `false` when the animator was already started.
    pub fn start(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state != AnimatorState::Idle {
                log::trace!("start ignored in state {:?}", inner.state);
                return false;
            }
            inner.state = AnimatorState::Running;
            inner.fraction = 0.0;
            inner.segment = Segment {
                from_fraction: 0.0,
                duration_nanos: inner.spec.duration_nanos(),
                delay_nanos: inner.spec.delay_nanos(),
                started_at_nanos: None,
            };
        }
        Self::schedule_frame(&self.inner);
        true
    }

    /// Freeze frame advancement. Calling it on a paused animator changes nothing.
    pub fn pause(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            match inner.state {
                AnimatorState::Running => {
                    inner.state = AnimatorState::Paused;
                    inner.registration.take()
                }
                AnimatorState::Paused => return,
                state => {
                    log::trace!("pause ignored in state {state:?}");
                    return;
                }
            }
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
    }

    /// Set the fraction directly. Only honoured while paused; returns the
    /// clamped fraction that was applied.
    pub fn set_fraction_complete(&self, fraction: f32) -> Option<f32> {
        let mut inner = self.inner.borrow_mut();
        if inner.state != AnimatorState::Paused {
            log::trace!("scrub ignored in state {:?}", inner.state);
            return None;
        }
        if fraction.is_nan() {
            log::trace!("scrub ignored: NaN fraction");
            return None;
        }
        let clamped = fraction.clamp(0.0, 1.0);
        inner.fraction = clamped;
        Some(clamped)
    }

    /// Resume advancing from the current fraction toward 1.
    ///
    /// A `duration_factor` of 0 finishes in the time the original duration
    /// would have spent on the remaining fraction; a positive factor finishes
    /// in `factor * duration`. Returns `false` unless the animator was paused.
    pub fn continue_animation(&self, duration_factor: f32) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state != AnimatorState::Paused {
                log::trace!("continue ignored in state {:?}", inner.state);
                return false;
            }
            let full = inner.spec.duration_nanos() as f64;
            let duration = if duration_factor.is_finite() && duration_factor > 0.0 {
                full * duration_factor as f64
            } else {
                full * (1.0 - inner.fraction) as f64
            };
            inner.segment = Segment {
                from_fraction: inner.fraction,
                duration_nanos: duration.round() as u64,
                delay_nanos: 0,
                started_at_nanos: None,
            };
            inner.state = AnimatorState::Running;
        }
        Self::schedule_frame(&self.inner);
        true
    }

    /// Stop without completing. The fraction keeps its last value and no
    /// further events are delivered.
    pub fn stop(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_finished() {
                return;
            }
            inner.state = AnimatorState::Stopped;
            inner.registration.take()
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatorInner>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatorInner>>, frame_time_nanos: u64) {
        let mut events: SmallVec<[AnimatorEvent; 2]> = SmallVec::new();
        let mut schedule_next = false;
        let listener = {
            let mut guard = this.borrow_mut();
            let inner = &mut *guard;
            inner.registration = None;
            if inner.state != AnimatorState::Running {
                return;
            }

            let segment = &mut inner.segment;
            let started_at = *segment.started_at_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(started_at);

            if elapsed < segment.delay_nanos {
                schedule_next = true;
            } else {
                let active = elapsed - segment.delay_nanos;
                let linear = if segment.duration_nanos == 0 {
                    1.0
                } else {
                    (active as f64 / segment.duration_nanos as f64).clamp(0.0, 1.0) as f32
                };
                let from = segment.from_fraction;
                if linear >= 1.0 {
                    inner.fraction = 1.0;
                    inner.state = AnimatorState::Completed;
                    events.push(AnimatorEvent::Progress(1.0));
                    events.push(AnimatorEvent::Completed);
                } else {
                    let eased = inner.spec.easing.transform(linear);
                    inner.fraction = from + (1.0 - from) * eased;
                    events.push(AnimatorEvent::Progress(inner.fraction));
                    schedule_next = true;
                }
            }
            inner.listener.clone()
        };

        if schedule_next {
            Self::schedule_frame(this);
        }

        let Some(listener) = listener else {
            return;
        };
        for event in events {
            // The listener may have paused or stopped us while handling progress.
            if event == AnimatorEvent::Completed
                && this.borrow().state != AnimatorState::Completed
            {
                break;
            }
            listener(event);
        }
    }
}

impl Clone for InterruptibleAnimator {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
