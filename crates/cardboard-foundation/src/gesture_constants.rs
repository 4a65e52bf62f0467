//! Shared gesture constants for touch/pointer handling.
//!
//! Values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Drag threshold in logical pixels.
///
/// A press must travel more than this distance vertically before the drag
/// recogniser reports `Began`. Smaller movements are treated as jitter and
/// the release is left to the host as a tap.
///
/// Matches common platform conventions (Android uses ~8dp for
/// ViewConfiguration.TOUCH_SLOP).
pub const DRAG_THRESHOLD: f32 = 8.0;
