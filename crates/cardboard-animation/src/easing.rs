//! Easing curves and interpolation.

/// Values that can be blended toward a target by a fraction.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Natural frequency of the critically damped curve, in units of the
/// animation duration. About 0.1% of the distance is left at the end and
/// normalised away.
const CRITICAL_OMEGA: f32 = 9.23;

/// Maps linear time in `[0, 1]` to eased progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Spring response with damping ratio 1, fitted to settle exactly at the
    /// end of the duration. Monotonic, never overshoots.
    CriticallyDamped,
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction.is_nan() || fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => fraction,
            Easing::CriticallyDamped => {
                let response =
                    |t: f32| 1.0 - (1.0 + CRITICAL_OMEGA * t) * (-CRITICAL_OMEGA * t).exp();
                (response(fraction) / response(1.0)).min(1.0)
            }
        }
    }
}
