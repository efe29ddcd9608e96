//! 3×3×3 twisty puzzle model for dragcube.
//!
//! This crate owns everything about the puzzle that is independent of input
//! and animation: the cubelet lattice and its integer-grid invariant, turn
//! commands and their rotations, slice selection, solved-state detection,
//! and deterministic scramble generation. Gesture interpretation and the
//! animated turn state machine live in `dragcube_view`.

mod axis;
mod lattice;
mod scramble;
mod turn;

/// Re-export of `cgmath`.
pub use cgmath;

pub use crate::axis::{Axis, Face, Layer, Sign};
pub use crate::lattice::{
    CUBELET_COUNT, Cubelet, CubeletState, GRID_COORDS, Lattice, LatticeError, LatticeState,
    SLICE_SIZE, SliceGroup,
};
pub use crate::scramble::{FULL_SCRAMBLE_LENGTH, ScrambleParams};
pub use crate::turn::{TURN_ANGLE, Turn};

/// Distance below which a cubelet counts as occupying its home cell.
pub const SOLVED_EPSILON: f32 = 0.1;
/// Tolerance when matching at-rest coordinates to the integer grid. Tighter
/// than [`SOLVED_EPSILON`] because slice selection runs on axis-aligned
/// positions that a commit has just snapped to the grid.
pub const SLICE_EPSILON: f32 = 0.05;
