//! Headless harness for driving a card sheet from tests.
//!
//! `SheetTestRule` owns a runtime, a settable layout and a recording
//! renderer, and advances time in fixed 60 Hz frames so animations are fully
//! deterministic.
//!
//! ```
//! use cardboard_testing::SheetTestRule;
//! use cardboard_ui::CardState;
//!
//! let mut rule = SheetTestRule::new();
//! rule.begin_drag();
//! rule.drag_to(-120.0);
//! rule.end_drag();
//! rule.pump_until_idle().unwrap();
//! assert_eq!(rule.current_state(), CardState::Expanded);
//! ```

use std::rc::Rc;
use std::sync::Arc;

use cardboard_core::{DefaultScheduler, Runtime, RuntimeHandle, FRAME_NANOS_60HZ};
use cardboard_foundation::{DragEvent, PointerEvent};
use cardboard_ui::{CardSheet, CardState, PanelHeights, SheetConfig, StaticLayout};
use cardboard_ui_graphics::Size;

use crate::recorder::RecordingRenderer;

/// Frames `pump_until_idle` runs before giving up.
pub const MAX_PUMP_FRAMES: usize = 1_000;

/// Container used by [`SheetTestRule::new`].
pub const DEFAULT_CONTAINER: Size = Size::new(390.0, 800.0);

/// Panels used by [`SheetTestRule::new`]: origins are 680, 500 and 300.
pub const DEFAULT_PANELS: PanelHeights = PanelHeights::new(100.0, 200.0, 200.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpError {
    /// Frame callbacks were still queued after this many frames.
    NotIdle { frames: usize },
}

impl std::fmt::Display for PumpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PumpError::NotIdle { frames } => {
                write!(f, "sheet still animating after {frames} frames")
            }
        }
    }
}

impl std::error::Error for PumpError {}

pub struct SheetTestRule {
    runtime: Runtime,
    layout: Rc<StaticLayout>,
    renderer: Rc<RecordingRenderer>,
    sheet: CardSheet,
    frame_time_nanos: u64,
    pointer_x: f32,
}

impl SheetTestRule {
    pub fn new() -> Self {
        Self::with_layout(DEFAULT_CONTAINER, DEFAULT_PANELS, SheetConfig::default())
    }

    pub fn with_layout(container: Size, panels: PanelHeights, config: SheetConfig) -> Self {
        Self::with_initial_state(container, panels, config, CardState::Collapsed)
    }

    pub fn with_initial_state(
        container: Size,
        panels: PanelHeights,
        config: SheetConfig,
        initial: CardState,
    ) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let layout = Rc::new(StaticLayout::new(container, panels));
        let renderer = Rc::new(RecordingRenderer::new());
        let sheet = CardSheet::with_initial_state(
            runtime.handle(),
            layout.clone(),
            renderer.clone(),
            config,
            initial,
        );
        Self {
            runtime,
            layout,
            renderer,
            sheet,
            frame_time_nanos: 0,
            pointer_x: container.width / 2.0,
        }
    }

    pub fn sheet(&self) -> &CardSheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut CardSheet {
        &mut self.sheet
    }

    pub fn renderer(&self) -> &RecordingRenderer {
        &self.renderer
    }

    pub fn layout(&self) -> &StaticLayout {
        &self.layout
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn current_state(&self) -> CardState {
        self.sheet.current_state()
    }

    pub fn card_origin(&self) -> f32 {
        self.sheet.card_origin()
    }

    pub fn is_animating(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }

    pub fn begin_drag(&mut self) {
        self.sheet.handle_drag_event(DragEvent::began());
    }

    pub fn drag_to(&mut self, translation_y: f32) {
        self.sheet.handle_drag_event(DragEvent::changed(translation_y));
    }

    pub fn end_drag(&mut self) {
        self.sheet.handle_drag_event(DragEvent::ended(0.0));
    }

    /// Began, one `Changed` per translation, then Ended.
    pub fn drag(&mut self, translations: &[f32]) {
        self.begin_drag();
        for &translation in translations {
            self.drag_to(translation);
        }
        self.end_drag();
    }

    /// Press at `y`, horizontally centred in the container.
    pub fn press(&mut self, y: f32) -> Option<DragEvent> {
        self.sheet
            .handle_pointer_event(&PointerEvent::down(self.pointer_x, y))
    }

    pub fn move_pointer(&mut self, y: f32) -> Option<DragEvent> {
        self.sheet
            .handle_pointer_event(&PointerEvent::moved(self.pointer_x, y))
    }

    pub fn release(&mut self, y: f32) -> Option<DragEvent> {
        self.sheet
            .handle_pointer_event(&PointerEvent::up(self.pointer_x, y))
    }

    pub fn cancel_pointer(&mut self, y: f32) -> Option<DragEvent> {
        self.sheet
            .handle_pointer_event(&PointerEvent::cancel(self.pointer_x, y))
    }

    /// Press on the card, move in `steps` even increments to `to_y`, release.
    pub fn swipe(&mut self, from_y: f32, to_y: f32, steps: usize) {
        self.press(from_y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.move_pointer(from_y + (to_y - from_y) * t);
        }
        self.release(to_y);
    }

    /// Drain one 60 Hz frame.
    pub fn advance_frame(&mut self) {
        self.advance_frame_by(FRAME_NANOS_60HZ);
    }

    pub fn advance_frame_by(&mut self, nanos: u64) {
        self.frame_time_nanos += nanos;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
    }

    /// Run 60 Hz frames covering at least `millis`.
    pub fn advance_time(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis.saturating_mul(1_000_000);
        while self.frame_time_nanos < target {
            self.advance_frame();
        }
    }

    /// Run frames until no frame callback is queued. Returns the frame count.
    pub fn pump_until_idle(&mut self) -> Result<usize, PumpError> {
        let mut frames = 0;
        while self.is_animating() {
            if frames >= MAX_PUMP_FRAMES {
                log::warn!("pump_until_idle gave up after {frames} frames");
                return Err(PumpError::NotIdle { frames });
            }
            self.advance_frame();
            frames += 1;
        }
        Ok(frames)
    }

    /// Resize the container and let the sheet re-read its geometry.
    pub fn set_container_size(&mut self, size: Size) {
        self.layout.set_container_size(size);
        self.sheet.on_container_resized();
    }

    pub fn set_panel_heights(&mut self, panels: PanelHeights) {
        self.layout.set_panel_heights(panels);
        self.sheet.on_container_resized();
    }
}

impl Default for SheetTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f` against a fresh default rule.
pub fn run_sheet_test<R>(f: impl FnOnce(&mut SheetTestRule) -> R) -> R {
    let mut rule = SheetTestRule::new();
    f(&mut rule)
}

#[cfg(test)]
#[path = "tests/rule_tests.rs"]
mod tests;
