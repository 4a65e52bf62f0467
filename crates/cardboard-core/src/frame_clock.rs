//! One-shot frame callbacks with RAII cancellation.

use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Entry point animations use to ask for the next frame.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Run `callback` on the next drained frame with the frame time in
    /// nanoseconds. Dropping the returned registration first cancels it.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        FrameCallbackRegistration {
            id: self.runtime.register_frame_callback(callback),
            runtime: self.runtime.clone(),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| callback(nanos / 1_000_000))
    }
}

/// Keeps a frame callback queued until it runs, is cancelled, or is dropped.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    /// False when the runtime was already gone at registration time.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Dequeue the callback now. Same as dropping the registration.
    pub fn cancel(self) {}
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        // Ids are never reused, so dequeuing one that already ran is a no-op.
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}
