//! The cubelet lattice: 27 rigid bodies on the integer grid.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use cgmath::{InnerSpace, MetricSpace, One, Quaternion, Vector3};
use itertools::iproduct;
use smallvec::SmallVec;

use crate::{Axis, SLICE_EPSILON, SOLVED_EPSILON, Turn};

/// Number of cubelets in the lattice.
pub const CUBELET_COUNT: usize = 27;
/// Number of cubelets in one slice.
pub const SLICE_SIZE: usize = 9;
/// Grid coordinates along one axis.
pub const GRID_COORDS: [f32; 3] = [-1.0, 0.0, 1.0];

/// One of the 27 cubelets, identified by its index in construction order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cubelet(pub u8);
impl fmt::Display for Cubelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The set of cubelets that rotate together in one turn.
pub type SliceGroup = SmallVec<[Cubelet; 9]>;

/// Fatal lattice-consistency violation. Turns must be aborted rather than
/// applied to a lattice in this condition.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum LatticeError {
    /// A slice matched the wrong number of cubelets, meaning the lattice has
    /// drifted off the integer grid since the last commit.
    #[error("slice on {axis:?} at {coord} matched {count} cubelets (expected {SLICE_SIZE})")]
    BadSliceCount {
        /// Turn axis of the attempted slice.
        axis: Axis,
        /// Coordinate of the attempted slice along the turn axis.
        coord: f32,
        /// Number of cubelets actually matched.
        count: usize,
    },
    /// A cubelet's resting coordinate is not on the integer grid.
    #[error("cubelet {cubelet} is off-grid on {axis:?} at {coord}")]
    OffGrid {
        /// Offending cubelet.
        cubelet: Cubelet,
        /// Axis on which the coordinate was inspected.
        axis: Axis,
        /// The off-grid coordinate.
        coord: f32,
    },
}

/// Static description of the 3×3×3 lattice: the home position of every
/// cubelet, in a fixed construction order.
#[derive(Debug)]
pub struct Lattice {
    home_positions: Box<[Vector3<f32>]>,
}
impl Lattice {
    /// Constructs the lattice, placing cubelets on the integer grid
    /// {-1,0,1}³ in z-major order.
    pub fn new() -> Arc<Self> {
        let home_positions = iproduct!(GRID_COORDS, GRID_COORDS, GRID_COORDS)
            .map(|(z, y, x)| Vector3::new(x, y, z))
            .collect();
        Arc::new(Self { home_positions })
    }

    /// Iterates over all cubelets in construction order.
    pub fn cubelets(&self) -> impl Iterator<Item = Cubelet> {
        (0..CUBELET_COUNT as u8).map(Cubelet)
    }

    /// Returns the grid coordinate a cubelet occupies when solved.
    pub fn home_position(&self, cubelet: Cubelet) -> Vector3<f32> {
        self.home_positions[cubelet.0 as usize]
    }
}

/// Position and orientation of one cubelet.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeletState {
    /// Current position. At rest this is exactly on the integer grid.
    pub position: Vector3<f32>,
    /// Current orientation, as the rotation from the solved orientation.
    pub orientation: Quaternion<f32>,
}

/// Mutable state of the whole lattice.
///
/// Turns only permute which grid cell each cubelet occupies and rotate its
/// orientation in 90° increments; the multiset of home positions never
/// changes.
#[derive(Debug, Clone)]
pub struct LatticeState {
    ty: Arc<Lattice>,
    cubelets: Box<[CubeletState]>,
}
impl Index<Cubelet> for LatticeState {
    type Output = CubeletState;

    fn index(&self, cubelet: Cubelet) -> &Self::Output {
        &self.cubelets[cubelet.0 as usize]
    }
}
impl IndexMut<Cubelet> for LatticeState {
    fn index_mut(&mut self, cubelet: Cubelet) -> &mut Self::Output {
        &mut self.cubelets[cubelet.0 as usize]
    }
}
impl LatticeState {
    /// Constructs the solved state: every cubelet at its home position with
    /// identity orientation.
    pub fn new(ty: Arc<Lattice>) -> Self {
        let cubelets = ty
            .cubelets()
            .map(|c| CubeletState {
                position: ty.home_position(c),
                orientation: Quaternion::one(),
            })
            .collect();
        Self { ty, cubelets }
    }

    /// Returns the static lattice description.
    pub fn ty(&self) -> &Arc<Lattice> {
        &self.ty
    }

    /// Returns whether every cubelet is within [`SOLVED_EPSILON`] of its
    /// home position.
    pub fn is_solved(&self) -> bool {
        self.ty.cubelets().all(|c| {
            self[c].position.distance(self.ty.home_position(c)) <= SOLVED_EPSILON
        })
    }

    /// Returns the cubelet currently occupying the grid cell at `position`,
    /// or `None` if no cubelet rests there.
    pub fn cubelet_at(&self, position: Vector3<f32>) -> Option<Cubelet> {
        self.ty
            .cubelets()
            .find(|&c| self[c].position.distance(position) < SLICE_EPSILON)
    }

    /// Collects the slice of cubelets whose coordinate along `axis` is
    /// within [`SLICE_EPSILON`] of `coord`.
    ///
    /// Any count other than exactly [`SLICE_SIZE`] means the lattice
    /// invariant has been violated; the caller must abort the turn.
    pub fn slice(&self, axis: Axis, coord: f32) -> Result<SliceGroup, LatticeError> {
        let group: SliceGroup = self
            .ty
            .cubelets()
            .filter(|&c| (axis.component(self[c].position) - coord).abs() < SLICE_EPSILON)
            .collect();
        if group.len() != SLICE_SIZE {
            let count = group.len();
            log::error!("slice on {axis:?} at {coord} matched {count} cubelets");
            return Err(LatticeError::BadSliceCount { axis, coord, count });
        }
        Ok(group)
    }

    /// Flattens a completed turn into the lattice: rotates each grouped
    /// cubelet by the turn's exact 90° rotation, then snaps its position
    /// back onto the integer grid so no floating-point error survives the
    /// commit.
    pub fn commit(&mut self, group: &SliceGroup, turn: Turn) {
        let rotation = turn.rotation();
        for &cubelet in group {
            let state = &mut self.cubelets[cubelet.0 as usize];
            let rotated = rotation * state.position;
            state.position = rotated.map(f32::round);
            state.orientation = (rotation * state.orientation).normalize();
        }
    }

    /// Selects and commits a turn in one step, with no animation.
    pub fn apply(&mut self, turn: Turn) -> Result<(), LatticeError> {
        let group = self.slice(turn.axis, turn.layer.coord())?;
        self.commit(&group, turn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use cgmath::vec3;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{Layer, Sign};

    fn solved() -> LatticeState {
        LatticeState::new(Lattice::new())
    }

    /// Integer cell key for position comparisons.
    fn cell(v: Vector3<f32>) -> [i8; 3] {
        [v.x.round() as i8, v.y.round() as i8, v.z.round() as i8]
    }

    #[test]
    fn test_home_positions_cover_grid() {
        let lattice = Lattice::new();
        let cells: HashSet<[i8; 3]> = lattice
            .cubelets()
            .map(|c| cell(lattice.home_position(c)))
            .collect();
        assert_eq!(cells.len(), CUBELET_COUNT);
        for coords in &cells {
            assert!(coords.iter().all(|c| (-1..=1).contains(c)));
        }
        // Home positions are exact, not merely near the grid.
        for c in lattice.cubelets() {
            let home = lattice.home_position(c);
            assert_eq!(home, home.map(f32::round));
        }
    }

    #[test]
    fn test_solved_at_construction() {
        assert!(solved().is_solved());
    }

    #[test]
    fn test_every_slice_has_nine_cubelets() {
        let state = solved();
        for axis in Axis::iter() {
            for layer in Layer::iter() {
                let group = state.slice(axis, layer.coord()).unwrap();
                assert_eq!(group.len(), SLICE_SIZE);
            }
        }
    }

    #[test]
    fn test_slices_partition_the_lattice() {
        let state = solved();
        for axis in Axis::iter() {
            let mut seen = HashSet::new();
            for layer in Layer::iter() {
                seen.extend(state.slice(axis, layer.coord()).unwrap());
            }
            assert_eq!(seen.len(), CUBELET_COUNT);
        }
    }

    #[test]
    fn test_bad_slice_count_is_fatal() {
        let mut state = solved();
        let stray = state.cubelet_at(vec3(1.0, 1.0, 1.0)).unwrap();
        state[stray].position.x = 0.5;
        assert_eq!(
            state.slice(Axis::X, 1.0),
            Err(LatticeError::BadSliceCount {
                axis: Axis::X,
                coord: 1.0,
                count: SLICE_SIZE - 1,
            }),
        );
    }

    #[test]
    fn test_turn_touches_exactly_nine_cubelets() {
        let mut state = solved();
        let turn = Turn {
            axis: Axis::Y,
            direction: Sign::Pos,
            layer: Layer::Pos,
        };
        let group: HashSet<Cubelet> =
            state.slice(turn.axis, turn.layer.coord()).unwrap().into_iter().collect();
        let before: Vec<CubeletState> = state.ty().cubelets().map(|c| state[c]).collect();
        state.apply(turn).unwrap();

        let touched: HashSet<Cubelet> = state
            .ty()
            .cubelets()
            .filter(|&c| state[c] != before[c.0 as usize])
            .collect();
        // All 9 grouped cubelets change state; the other 18 are untouched.
        assert_eq!(touched, group);
        assert_eq!(touched.len(), SLICE_SIZE);

        // The slice center rotates in place; the other 8 change cells.
        let moved_cells = state
            .ty()
            .cubelets()
            .filter(|&c| cell(state[c].position) != cell(before[c.0 as usize].position))
            .count();
        assert_eq!(moved_cells, SLICE_SIZE - 1);

        // Cells are still a permutation of the home cells.
        let cells: HashSet<[i8; 3]> =
            state.ty().cubelets().map(|c| cell(state[c].position)).collect();
        assert_eq!(cells.len(), CUBELET_COUNT);
    }

    #[test]
    fn test_positions_exact_after_commit() {
        let mut state = solved();
        for turn in Turn::all().take(7) {
            state.apply(turn).unwrap();
        }
        for c in state.ty().cubelets() {
            let pos = state[c].position;
            assert_eq!(pos, pos.map(f32::round));
            assert!(pos.x.abs() <= 1.0 && pos.y.abs() <= 1.0 && pos.z.abs() <= 1.0);
        }
    }

    #[test]
    fn test_four_turns_are_identity() {
        let mut state = solved();
        let turn = Turn {
            axis: Axis::Z,
            direction: Sign::Neg,
            layer: Layer::Mid,
        };
        for _ in 0..4 {
            state.apply(turn).unwrap();
        }
        assert!(state.is_solved());
        for c in state.ty().cubelets() {
            assert_eq!(cell(state[c].position), cell(state.ty().home_position(c)));
            // Four quarter turns are a full rotation, which the quaternion
            // double cover represents as ±identity.
            assert!((state[c].orientation.s.abs() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_turn_then_reverse_is_identity() {
        let mut state = solved();
        let turn = Turn {
            axis: Axis::X,
            direction: Sign::Pos,
            layer: Layer::Neg,
        };
        state.apply(turn).unwrap();
        assert!(!state.is_solved());
        state.apply(turn.reverse()).unwrap();
        assert!(state.is_solved());
    }

    #[test]
    fn test_single_turn_leaves_unsolved() {
        for turn in Turn::all() {
            let mut state = solved();
            state.apply(turn).unwrap();
            assert!(!state.is_solved(), "{turn} left the cube solved");
        }
    }
}
