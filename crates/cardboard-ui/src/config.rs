use cardboard_animation::{AnimationSpec, SpringSpec};

/// Distance the collapsed card stays visible above the container's bottom edge.
pub const DEFAULT_COLLAPSED_REVEAL: f32 = 120.0;

/// Duration of an automatic card transition.
pub const DEFAULT_TRANSITION_MILLIS: u64 = 500;

/// Tunables for a [`CardSheet`](crate::CardSheet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetConfig {
    pub collapsed_reveal: f32,
    pub transition_spec: AnimationSpec,
    /// Passed to the transition when a drag ends. 0 finishes in the time the
    /// full duration would have spent on the remaining distance.
    pub resume_duration_factor: f32,
}

impl SheetConfig {
    pub fn with_collapsed_reveal(mut self, reveal: f32) -> Self {
        self.collapsed_reveal = reveal;
        self
    }

    pub fn with_transition_spec(mut self, spec: AnimationSpec) -> Self {
        self.transition_spec = spec;
        self
    }

    pub fn with_resume_duration_factor(mut self, factor: f32) -> Self {
        self.resume_duration_factor = factor;
        self
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            collapsed_reveal: DEFAULT_COLLAPSED_REVEAL,
            transition_spec: AnimationSpec::spring_timed(
                DEFAULT_TRANSITION_MILLIS,
                SpringSpec::default_spring(),
            ),
            resume_duration_factor: 0.0,
        }
    }
}
