//! Interaction preferences.

use serde::{Deserialize, Serialize};

use crate::animations::InterpolateFn;

/// Preferences controlling how turns animate.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct TurnPreferences {
    /// Duration of one 90° turn, in seconds.
    pub turn_duration: f32,
    /// Whether queued turns (e.g. a scramble) speed up exponentially with
    /// queue depth.
    pub dynamic_turn_speed: bool,
    /// Easing applied to turn animation progress.
    pub interpolation: InterpolateFn,
}
impl Default for TurnPreferences {
    fn default() -> Self {
        Self {
            turn_duration: 0.3,
            dynamic_turn_speed: true,
            interpolation: InterpolateFn::default(),
        }
    }
}
