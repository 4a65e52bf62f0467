//! Core runtime for the Cardboard interactive sheet.
//!
//! Everything here runs on a single UI thread. The host owns a [`Runtime`],
//! hands out [`RuntimeHandle`]s, and drives time forward by calling
//! [`RuntimeHandle::drain_frame_callbacks`] once per frame.

mod frame_clock;
pub mod platform;
mod runtime;

pub use frame_clock::{FrameClock, FrameCallbackRegistration};
pub use platform::{Clock, MonotonicClock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

/// Nanoseconds in one frame at 60 Hz, the cadence hosts and tests step with.
pub const FRAME_NANOS_60HZ: u64 = 16_666_667;
