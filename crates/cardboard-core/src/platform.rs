//! Host seams: who wakes the frame loop and where time comes from.
//!
//! A windowed app, a headless test harness and the scripted demo each plug
//! in their own scheduler; only the demo needs a real clock.

use web_time::Instant;

/// Asked for a frame every time a frame callback is queued.
///
/// Hosts often flip a flag from here that another thread polls, hence the
/// `Send + Sync` bound.
pub trait RuntimeScheduler: Send + Sync {
    fn schedule_frame(&self);
}

/// Source of wall-clock time for hosts that measure real intervals.
pub trait Clock: Send + Sync {
    type Instant: Copy + Send + Sync;

    fn now(&self) -> Self::Instant;

    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// Wall clock that reports frame times as nanoseconds since its creation.
///
/// Backed by `web_time`, so the same code path works on desktop and WASM.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Frame timestamp suitable for [`crate::RuntimeHandle::drain_frame_callbacks`].
    pub fn frame_time_nanos(&self) -> u64 {
        let elapsed = self.origin.elapsed().as_nanos();
        u64::try_from(elapsed).unwrap_or(u64::MAX)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
