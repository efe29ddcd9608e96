//! Axes, signs, faces, and layer coordinates for a 3×3×3 puzzle.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::SLICE_EPSILON;

/// 3-dimensional axis.
#[derive(
    Serialize, Deserialize, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns the other two axes, in `x < y < z` order.
    pub fn perpendiculars(self) -> [Axis; 2] {
        use Axis::*;

        match self {
            X => [Y, Z],
            Y => [X, Z],
            Z => [X, Y],
        }
    }

    /// Returns the axis that is neither `a` nor `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn third(a: Axis, b: Axis) -> Axis {
        use Axis::*;

        match a as u8 + b as u8 {
            _ if a == b => panic!("no third axis for {a:?} and {b:?}"),
            1 => Z, // X + Y
            2 => Y, // X + Z
            3 => X, // Y + Z
            _ => unreachable!(),
        }
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// Returns the component of `v` along this axis.
    pub fn component(self, v: Vector3<f32>) -> f32 {
        v[self as usize]
    }
}

/// Positive or negative.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Sign {
    /// Returns the opposite sign.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }

    /// Returns `-1.0` or `1.0`.
    pub fn float(self) -> f32 {
        self as i8 as f32
    }
}

/// One of the six outer faces of the cube.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    /// Right (+X).
    R = 0,
    /// Left (-X).
    L = 1,
    /// Up (+Y).
    U = 2,
    /// Down (-Y).
    D = 3,
    /// Front (+Z).
    F = 4,
    /// Back (-Z).
    B = 5,
}
impl Face {
    /// Returns the axis perpendicular to this face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }

    /// Returns which side of the cube this face is on.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }

    /// Returns the face on the opposite side of the cube.
    #[must_use]
    pub fn opposite(self) -> Self {
        use Face::*;

        match self {
            R => L,
            L => R,
            U => D,
            D => U,
            F => B,
            B => F,
        }
    }

    /// Returns the face on the given side of the given axis.
    pub fn from_axis_sign(axis: Axis, sign: Sign) -> Self {
        use Face::*;

        match (axis, sign) {
            (Axis::X, Sign::Pos) => R,
            (Axis::X, Sign::Neg) => L,
            (Axis::Y, Sign::Pos) => U,
            (Axis::Y, Sign::Neg) => D,
            (Axis::Z, Sign::Pos) => F,
            (Axis::Z, Sign::Neg) => B,
        }
    }

    /// Returns the outward normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.axis().unit_vec3() * self.sign().float()
    }

    /// Returns the face's one-letter symbol.
    pub fn symbol(self) -> char {
        b"RLUDFB"[self as usize] as char
    }

    /// Returns the face's name.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            R => "Right",
            L => "Left",
            U => "Up",
            D => "Down",
            F => "Front",
            B => "Back",
        }
    }
}

/// Layer coordinate along a turn axis.
#[derive(
    Serialize, Deserialize, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum Layer {
    /// Layer at coordinate -1.
    Neg = -1,
    /// Middle layer, at coordinate 0.
    Mid = 0,
    /// Layer at coordinate +1.
    Pos = 1,
}
impl Layer {
    /// Returns the grid coordinate of this layer.
    pub fn coord(self) -> f32 {
        self as i8 as f32
    }

    /// Returns the layer whose grid coordinate matches `coord`, or `None` if
    /// `coord` is not on the grid (which, at rest, indicates drift).
    pub fn from_coord(coord: f32) -> Option<Self> {
        let rounded = coord.round();
        if (coord - rounded).abs() >= SLICE_EPSILON {
            return None;
        }
        match rounded as i8 {
            -1 => Some(Layer::Neg),
            0 => Some(Layer::Mid),
            1 => Some(Layer::Pos),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_third_axis() {
        for a in Axis::iter() {
            for b in Axis::iter() {
                if a == b {
                    continue;
                }
                let c = Axis::third(a, b);
                assert_ne!(c, a);
                assert_ne!(c, b);
                assert_eq!(c, Axis::third(b, a));
            }
        }
        for axis in Axis::iter() {
            let [a, b] = axis.perpendiculars();
            assert!(a < b);
            assert_eq!(Axis::third(a, b), axis);
        }
    }

    #[test]
    fn test_face_round_trip() {
        for face in Face::iter() {
            assert_eq!(face, Face::from_axis_sign(face.axis(), face.sign()));
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.opposite().axis(), face.axis());
            assert_eq!(face.opposite().sign(), face.sign().flip());
            assert_eq!(
                face.normal(),
                face.opposite().normal() * -1.0,
                "{} and {} normals must oppose",
                face.name(),
                face.opposite().name(),
            );
        }
    }

    #[test]
    fn test_layer_from_coord() {
        assert_eq!(Layer::from_coord(-1.0), Some(Layer::Neg));
        assert_eq!(Layer::from_coord(0.0), Some(Layer::Mid));
        assert_eq!(Layer::from_coord(1.0), Some(Layer::Pos));
        assert_eq!(Layer::from_coord(1.003), Some(Layer::Pos));
        assert_eq!(Layer::from_coord(0.5), None);
        assert_eq!(Layer::from_coord(2.0), None);
        for layer in Layer::iter() {
            assert_eq!(Layer::from_coord(layer.coord()), Some(layer));
        }
    }
}
