//! Animation system for Cardboard
//!
//! Provides easing curves, timed animation specs, and the interruptible
//! progress animator that backs interactive sheet transitions.

mod animator;
mod easing;
mod spec;

pub use animator::{AnimatorEvent, AnimatorState, InterruptibleAnimator};
pub use easing::{Easing, Lerp};
pub use spec::{AnimationSpec, SpringSpec};

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
