//! Pointer events and the vertical drag recogniser that feeds the card sheet.

pub mod gesture_constants;
pub mod gestures;
pub mod pointer;

pub use gestures::{DragEvent, DragGesture, DragPhase};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use crate::gesture_constants::DRAG_THRESHOLD;
    pub use crate::gestures::{DragEvent, DragGesture, DragPhase};
    pub use crate::pointer::{PointerEvent, PointerEventKind};
}
