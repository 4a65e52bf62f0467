//! Testing utilities and harness for Cardboard

pub mod recorder;
pub mod rule;

pub use recorder::RecordingRenderer;
pub use rule::*;

pub mod prelude {
    pub use crate::recorder::RecordingRenderer;
    pub use crate::rule::*;
}
