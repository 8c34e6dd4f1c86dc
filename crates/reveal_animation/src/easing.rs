//! Easing curves
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, starts at 0, ends at 1 and is
//! monotonically non-decreasing. Entrance transitions only need that; which
//! curve is picked is a cosmetic choice.

use serde::{Deserialize, Serialize};

/// Easing function applied to normalized progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-out
    Power1Out,
    /// Cubic ease-out
    Power2Out,
    /// Quartic ease-out (default for entrances)
    #[default]
    Power3Out,
    /// Cubic ease-in-out
    Power2InOut,
    /// Sinusoidal ease-in-out
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}
