//! Per-phase easing curves
//!
//! The interpolators the animation was designed around: a gentle
//! deceleration for the long pour, and overshoots for the bounce and the
//! checkmark snap. Inputs are clamped to `[0, 1]`; `Overshoot` is the
//! one curve whose output intentionally exceeds 1.0 before returning to
//! it, and callers decide whether to clamp that away.

/// Reparameterization of a raw elapsed-time fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Identity curve.
    Linear,
    /// Fast start, slowing toward the end: `1 - (1-t)^(2*factor)`.
    Decelerate { factor: f32 },
    /// Shoots past 1.0 and settles back: `s^2 * ((tension+1)*s + tension) + 1`
    /// with `s = t - 1`.
    Overshoot { tension: f32 },
}

impl Easing {
    /// Curve of the filling phase.
    pub const FILL: Self = Easing::Decelerate { factor: 0.8 };
    /// Curve of the bounce phase.
    pub const BOUNCE: Self = Easing::Overshoot { tension: 2.5 };
    /// Curve of the checkmark phase.
    pub const TICK: Self = Easing::Overshoot { tension: 2.0 };

    /// Apply the curve to a raw progress value.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate { factor } => 1.0 - (1.0 - t).powf(2.0 * factor),
            Easing::Overshoot { tension } => {
                let s = t - 1.0;
                s * s * ((tension + 1.0) * s + tension) + 1.0
            }
        }
    }
}
