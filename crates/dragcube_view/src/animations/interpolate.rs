//! Interpolation functions.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing function applied to turn animation progress.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InterpolateFn {
    /// Constant angular velocity.
    Linear,
    /// Ease-in/ease-out using cosine from 0.0 to PI.
    #[default]
    Cosine,
}
impl InterpolateFn {
    /// Maps animation progress from the range 0.0 to 1.0 to eased progress
    /// in the same range.
    pub fn interpolate(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for f in [InterpolateFn::Linear, InterpolateFn::Cosine] {
            assert!(f.interpolate(0.0).abs() < 1e-6);
            assert!((f.interpolate(1.0) - 1.0).abs() < 1e-6);
            assert!((f.interpolate(0.5) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cosine_is_monotone() {
        let samples: Vec<f32> = (0..=100)
            .map(|i| InterpolateFn::Cosine.interpolate(i as f32 / 100.0))
            .collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }
}
