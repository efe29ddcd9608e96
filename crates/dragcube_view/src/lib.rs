//! Gesture interpretation and turn animation for dragcube.
//!
//! Data flows through this crate in one direction: on pointer-down the
//! shell's ray caster reports a [`RayHit`] and the [`CubeView`] records a
//! drag anchor; on pointer-move the [`drag`] interpreter turns the anchor
//! and the current intersection point into a turn direction; the
//! [`CubeSimulation`] selects the slice, holds the interaction lock while
//! the [`animations`] state machine plays the rotation, and flattens the
//! slice back onto the integer grid on commit. The shell draws whatever
//! [`CubeSimulation::cubelet_transforms`] reports each frame and may query
//! [`CubeView::is_solved`] after a turn commits.

pub mod animations;
pub mod drag;
mod prefs;
mod simulation;
mod view;

/// Re-export of `dragcube_core`.
pub use dragcube_core;
/// Re-export of `parking_lot`, whose `Mutex` wraps the shared simulation.
pub use parking_lot;

pub use crate::prefs::TurnPreferences;
pub use crate::simulation::CubeSimulation;
pub use crate::view::{CubeView, RayHit};
