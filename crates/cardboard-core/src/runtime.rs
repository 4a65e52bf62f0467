use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::thread::ThreadId;

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

// One sheet keeps at most one animator queued, so four slots is plenty.
type FrameQueue = SmallVec<[(FrameCallbackId, FrameCallback); 4]>;

struct RuntimeState {
    scheduler: Arc<dyn RuntimeScheduler>,
    queue: RefCell<FrameQueue>,
    last_id: Cell<FrameCallbackId>,
    needs_frame: Cell<bool>,
    // Ids cancelled while a drain is running; they may already be taken out
    // of the queue but must not run.
    cancelled_mid_drain: RefCell<Option<SmallVec<[FrameCallbackId; 4]>>>,
    owner: ThreadId,
}

impl RuntimeState {
    fn enqueue(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.last_id.get() + 1;
        self.last_id.set(id);
        self.queue.borrow_mut().push((id, callback));
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
        id
    }

    fn dequeue(&self, id: FrameCallbackId) {
        if let Some(cancelled) = self.cancelled_mid_drain.borrow_mut().as_mut() {
            cancelled.push(id);
        }
        let mut queue = self.queue.borrow_mut();
        queue.retain(|(queued, _)| *queued != id);
        self.needs_frame.set(!queue.is_empty());
    }

    fn drain(&self, frame_time_nanos: u64) {
        // Take the whole queue first: callbacks may enqueue for the next frame.
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        log::trace!("frame at {frame_time_nanos}ns runs {} callback(s)", due.len());
        let outer = self.cancelled_mid_drain.replace(Some(SmallVec::new()));
        for (id, callback) in due {
            let cancelled = self
                .cancelled_mid_drain
                .borrow()
                .as_ref()
                .is_some_and(|cancelled| cancelled.contains(&id));
            if cancelled {
                log::trace!("skipping frame callback {id} cancelled during this frame");
                continue;
            }
            callback(frame_time_nanos);
        }
        self.cancelled_mid_drain.replace(outer);
        self.needs_frame.set(!self.queue.borrow().is_empty());
    }
}

/// Owner of the frame-callback queue.
///
/// Dropping the runtime invalidates every [`RuntimeHandle`]; registrations
/// made through a dead handle are inert.
#[derive(Clone)]
pub struct Runtime {
    state: Rc<RuntimeState>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let state = RuntimeState {
            scheduler,
            queue: RefCell::default(),
            last_id: Cell::new(0),
            needs_frame: Cell::new(false),
            cancelled_mid_drain: RefCell::new(None),
            owner: std::thread::current().id(),
        };
        Self {
            state: Rc::new(state),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            state: Rc::downgrade(&self.state),
            owner: self.state.owner,
        }
    }

    /// True while at least one frame callback is waiting.
    pub fn needs_frame(&self) -> bool {
        self.state.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// Scheduler for hosts that poll [`Runtime::needs_frame`] instead of being
/// woken up.
#[derive(Debug, Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Weak, cloneable access to a [`Runtime`]. Must stay on the runtime's thread.
#[derive(Clone)]
pub struct RuntimeHandle {
    state: Weak<RuntimeState>,
    owner: ThreadId,
}

impl RuntimeHandle {
    /// Queue `callback` for the next drained frame. `None` once the runtime
    /// is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.assert_ui_thread();
        let state = self.state.upgrade()?;
        Some(state.enqueue(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(state) = self.state.upgrade() {
            state.dequeue(id);
        }
    }

    /// Run every callback queued before this call, in registration order.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.assert_ui_thread();
        if let Some(state) = self.state.upgrade() {
            state.drain(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| !state.queue.borrow().is_empty())
    }

    pub fn needs_frame(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.needs_frame.get())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    pub fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.owner,
            "runtime touched off its UI thread"
        );
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
