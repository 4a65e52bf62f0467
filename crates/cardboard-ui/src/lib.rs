//! Interruptible bottom-sheet card for Cardboard.
//!
//! The card rests in one of three [`CardState`]s. Moving between them is
//! always a single [`Transition`] driven by an interruptible animator. Drags
//! pause and scrub that transition instead of moving the card directly, so a
//! drag can grab a running animation and a release hands it back without the
//! card jumping.
//!
//! [`CardSheet`] wires everything to a [`LayoutProvider`] and a
//! [`CardRenderer`]. Hosts drive time through the `cardboard-core` runtime.

mod config;
mod error;
mod gesture;
mod layout;
mod position;
mod render;
mod sheet;
mod state;
mod transition;

pub use config::{SheetConfig, DEFAULT_COLLAPSED_REVEAL, DEFAULT_TRANSITION_MILLIS};
pub use error::TransitionError;
pub use gesture::GestureCoordinator;
pub use layout::{LayoutProvider, StaticLayout};
pub use position::{target_origin, PanelHeights, PositionModel};
pub use render::CardRenderer;
pub use sheet::CardSheet;
pub use state::{CardState, CardStateMachine, TransitionDirection};
pub use transition::{
    Transition, TransitionController, TransitionHandle, TransitionId, TransitionOutcome,
    TransitionRequest,
};

pub use cardboard_foundation::{DragEvent, DragPhase, PointerEvent, PointerEventKind};
pub use cardboard_ui_graphics::{Point, Rect, Size};

pub mod prelude {
    pub use crate::{
        CardRenderer, CardSheet, CardState, LayoutProvider, PanelHeights, SheetConfig,
        StaticLayout, TransitionOutcome,
    };
}
