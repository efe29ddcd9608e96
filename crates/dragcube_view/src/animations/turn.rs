//! The turn state machine: Idle → Grouped → Rotating → Committing → Idle.

use dragcube_core::{SliceGroup, Turn};
use web_time::Duration;

use crate::TurnPreferences;

/// If at least this much of a turn would play in one frame, just skip the
/// animation to reduce unnecessary flashing.
const MIN_TURN_DELTA: f32 = 1.0 / 3.0;

/// Higher number means faster exponential increase in turn speed.
const EXP_TURN_FACTOR: f32 = 0.5;

/// A turn in flight: the command plus the slice rotating under the shared
/// pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnAnimation {
    /// Turn being animated.
    pub turn: Turn,
    /// Cubelets rotating together.
    pub group: SliceGroup,
}

/// Progress of the one turn that may be active at a time.
///
/// While this is anything other than [`Idle`](Self::Idle) the interaction
/// lock is held: new turn requests are dropped, not queued. The owner drives
/// the machine with [`proceed`](Self::proceed) and flattens the slice into
/// the lattice when it reaches [`Committing`](Self::Committing).
#[derive(Debug, Default, Clone, PartialEq)]
pub enum TurnAnimationState {
    /// No turn active; interaction enabled.
    #[default]
    Idle,
    /// Slice selected and grouped under the pivot; rotation starts on the
    /// next tick.
    Grouped {
        /// Turn waiting to start.
        anim: TurnAnimation,
    },
    /// Pivot angle interpolating from 0° to 90°.
    Rotating {
        /// Turn in progress.
        anim: TurnAnimation,
        /// Progress from 0.0 to 1.0.
        progress: f32,
    },
    /// Interpolation complete; the pivot is pinned at exactly ±90° until the
    /// owner flattens the slice back into the lattice.
    Committing {
        /// Finished turn awaiting its commit.
        anim: TurnAnimation,
    },
}
impl TurnAnimationState {
    /// Returns whether no turn is active and interaction is enabled.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Holds a freshly selected slice, taking the interaction lock.
    pub fn begin(turn: Turn, group: SliceGroup) -> Self {
        Self::Grouped {
            anim: TurnAnimation { turn, group },
        }
    }

    /// Steps the animation forward. Returns whether the puzzle should be
    /// redrawn next frame.
    ///
    /// `queue_max` is the recent high-water mark of pending turns; with
    /// `dynamic_turn_speed` enabled, deeper queues play exponentially
    /// faster.
    pub fn proceed(&mut self, delta: Duration, prefs: &TurnPreferences, queue_max: usize) -> bool {
        // Grouped starts rotating on the first tick after grouping.
        *self = match std::mem::take(self) {
            Self::Grouped { anim } => Self::Rotating {
                anim,
                progress: 0.0,
            },
            other => other,
        };
        let Self::Rotating { progress, .. } = self else {
            return false;
        };

        // `turn_duration` is in seconds (per one turn); `base_speed` is
        // fraction of a turn per frame.
        let base_speed = delta.as_secs_f32() / prefs.turn_duration;
        let speed_mod = match prefs.dynamic_turn_speed {
            true => ((queue_max.saturating_sub(1)) as f32 * EXP_TURN_FACTOR).exp(),
            false => 1.0,
        };
        let mut turn_delta = base_speed * speed_mod;
        // Cap the delta at 1.0, and also handle the case where something
        // went wrong with the calculation (e.g. division by zero).
        if !(0.0..MIN_TURN_DELTA).contains(&turn_delta) {
            turn_delta = 1.0; // Instantly complete the turn.
        }

        *progress += turn_delta;
        if *progress >= 1.0 {
            *self = match std::mem::take(self) {
                Self::Rotating { anim, .. } => Self::Committing { anim },
                other => other,
            };
        }
        true
    }

    /// Returns the turn in flight and its raw (un-eased) progress, if any.
    pub fn current(&self) -> Option<(&TurnAnimation, f32)> {
        match self {
            Self::Idle => None,
            Self::Grouped { anim } => Some((anim, 0.0)),
            Self::Rotating { anim, progress } => Some((anim, *progress)),
            Self::Committing { anim } => Some((anim, 1.0)),
        }
    }
}
