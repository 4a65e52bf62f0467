use crate::easing::Easing;

/// How a timed animation runs: total length, curve and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Tween that follows `spring`'s response over a fixed duration.
    ///
    /// The curve is always the critically damped one: a timed tween has to
    /// land exactly on its target, so bouncy springs are clamped to it.
    pub fn spring_timed(duration_millis: u64, spring: SpringSpec) -> Self {
        if spring.damping_ratio < 1.0 {
            log::debug!(
                "damping ratio {} would overshoot; using critical damping",
                spring.damping_ratio
            );
        }
        Self::tween(duration_millis, Easing::CriticallyDamped)
    }

    pub fn with_delay(self, delay_millis: u64) -> Self {
        Self {
            delay_millis,
            ..self
        }
    }

    pub(crate) fn duration_nanos(&self) -> u64 {
        millis_to_nanos(self.duration_millis)
    }

    pub(crate) fn delay_nanos(&self) -> u64 {
        millis_to_nanos(self.delay_millis)
    }
}

fn millis_to_nanos(millis: u64) -> u64 {
    millis.saturating_mul(1_000_000)
}

/// Spring shape for timed tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critical damping; below 1.0 the spring bounces.
    pub damping_ratio: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self { damping_ratio: 1.0 }
    }

    pub fn bouncy() -> Self {
        Self { damping_ratio: 0.5 }
    }

    pub fn is_critically_damped(&self) -> bool {
        (self.damping_ratio - 1.0).abs() < f32::EPSILON
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}
