use std::cell::RefCell;

use cardboard_ui::CardRenderer;

/// Renderer that keeps every origin it was given.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    origins: RefCell<Vec<f32>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origins(&self) -> Vec<f32> {
        self.origins.borrow().clone()
    }

    pub fn last(&self) -> Option<f32> {
        self.origins.borrow().last().copied()
    }

    pub fn len(&self) -> usize {
        self.origins.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.origins.borrow_mut().clear();
    }

    /// Largest distance between two consecutive origins.
    pub fn max_step(&self) -> f32 {
        self.origins
            .borrow()
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .fold(0.0, f32::max)
    }
}

impl CardRenderer for RecordingRenderer {
    fn set_card_origin(&self, origin_y: f32) {
        self.origins.borrow_mut().push(origin_y);
    }
}
