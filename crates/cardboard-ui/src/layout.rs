use std::cell::Cell;

use cardboard_ui_graphics::Size;

use crate::position::PanelHeights;

/// Source of the geometry the card is positioned against.
pub trait LayoutProvider {
    fn container_size(&self) -> Size;
    fn panel_heights(&self) -> PanelHeights;
}

/// Layout whose values are set by the host.
///
/// After changing the container size, call
/// [`CardSheet::on_container_resized`](crate::CardSheet::on_container_resized)
/// so the card picks up the new geometry.
#[derive(Debug, Default)]
pub struct StaticLayout {
    container_size: Cell<Size>,
    panel_heights: Cell<PanelHeights>,
}

impl StaticLayout {
    pub fn new(container_size: Size, panel_heights: PanelHeights) -> Self {
        Self {
            container_size: Cell::new(container_size),
            panel_heights: Cell::new(panel_heights),
        }
    }

    pub fn set_container_size(&self, size: Size) {
        self.container_size.set(size);
    }

    pub fn set_panel_heights(&self, panels: PanelHeights) {
        self.panel_heights.set(panels);
    }
}

impl LayoutProvider for StaticLayout {
    fn container_size(&self) -> Size {
        self.container_size.get()
    }

    fn panel_heights(&self) -> PanelHeights {
        self.panel_heights.get()
    }
}
