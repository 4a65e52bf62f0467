//! Vertical origins of the card for each resting state.
//!
//! Origins are measured from the top of the container, so a larger origin
//! means a lower, more collapsed card.

use crate::state::CardState;

/// Heights of the three stacked panels inside the card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelHeights {
    pub top: f32,
    pub mid: f32,
    pub bottom: f32,
}

impl PanelHeights {
    pub const fn new(top: f32, mid: f32, bottom: f32) -> Self {
        Self { top, mid, bottom }
    }

    /// Negative or NaN heights count as empty panels.
    pub fn sanitized(self) -> Self {
        fn clean(value: f32) -> f32 {
            if value.is_nan() {
                0.0
            } else {
                value.max(0.0)
            }
        }
        Self {
            top: clean(self.top),
            mid: clean(self.mid),
            bottom: clean(self.bottom),
        }
    }

    pub fn total(&self) -> f32 {
        self.top + self.mid + self.bottom
    }
}

/// Origin of `state` inside a container of `container_height`.
///
/// Returns `None` when the container has no usable height yet.
pub fn target_origin(
    state: CardState,
    container_height: f32,
    panels: PanelHeights,
    collapsed_reveal: f32,
) -> Option<f32> {
    if !container_height.is_finite() || container_height <= 0.0 {
        return None;
    }
    let panels = panels.sanitized();
    let reveal = collapsed_reveal.max(0.0);
    let origin = match state {
        CardState::Collapsed => (container_height - reveal).max(0.0),
        CardState::Expanded => (container_height - (panels.top + panels.mid)).max(0.0),
        CardState::FullyExpanded => (container_height - panels.total()).max(reveal),
    };
    Some(origin)
}

/// [`target_origin`] with a memory of the last origin it could compute.
#[derive(Debug, Clone)]
pub struct PositionModel {
    collapsed_reveal: f32,
    last_good: [Option<f32>; 3],
}

impl PositionModel {
    pub fn new(collapsed_reveal: f32) -> Self {
        Self {
            collapsed_reveal,
            last_good: [None; 3],
        }
    }

    pub fn collapsed_reveal(&self) -> f32 {
        self.collapsed_reveal
    }

    /// Origin for `state`; falls back to the last good value, then to the
    /// collapsed reveal, while geometry is unavailable.
    pub fn origin(&mut self, state: CardState, container_height: f32, panels: PanelHeights) -> f32 {
        if target_origin(state, container_height, panels, self.collapsed_reveal).is_some() {
            // Usable geometry refreshes every state, not only the one asked for.
            for known in CardState::ALL {
                self.last_good[known.index()] =
                    target_origin(known, container_height, panels, self.collapsed_reveal);
            }
        } else {
            log::trace!(
                "geometry unavailable (height {container_height}); reusing origin for {state:?}"
            );
        }
        self.last_good[state.index()].unwrap_or(self.collapsed_reveal)
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
