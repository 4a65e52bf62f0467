//! Pure geometry data for Cardboard.
//!
//! Points, sizes and rectangles shared by the gesture, layout and
//! rendering seams.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
