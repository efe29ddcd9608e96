//! Turn commands and their rotations.

use std::fmt;

use cgmath::{Deg, Quaternion, Rotation3};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{Axis, Face, Layer, Sign};

/// Angle of a completed turn.
pub const TURN_ANGLE: Deg<f32> = Deg(90.0);

/// A single 90° rotation of one slice about one axis.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Turn {
    /// Axis to rotate about.
    pub axis: Axis,
    /// Rotation direction. `Pos` is a +90° right-handed rotation about the
    /// positive axis.
    pub direction: Sign,
    /// Layer to rotate.
    pub layer: Layer,
}
impl Turn {
    /// Returns the turn that undoes this one.
    #[must_use]
    pub fn reverse(self) -> Self {
        Self {
            direction: self.direction.flip(),
            ..self
        }
    }

    /// Returns the exact rotation of the completed turn.
    pub fn rotation(self) -> Quaternion<f32> {
        self.rotation_at(TURN_ANGLE)
    }

    /// Returns the rotation partway through the turn, at an unsigned `angle`
    /// from 0° to 90°.
    pub fn rotation_at(self, angle: Deg<f32>) -> Quaternion<f32> {
        Quaternion::from_axis_angle(self.axis.unit_vec3(), Deg(angle.0 * self.direction.float()))
    }

    /// Iterates over all 18 distinct turns.
    pub fn all() -> impl Iterator<Item = Turn> {
        iproduct!(Axis::iter(), Layer::iter(), [Sign::Pos, Sign::Neg])
            .map(|(axis, layer, direction)| Turn {
                axis,
                direction,
                layer,
            })
    }
}
impl fmt::Display for Turn {
    /// Formats the turn in face-turn notation: the outer layers take the
    /// letter of the face on their side of the axis, the middle layers take
    /// the M/E/S slice letters, and a negative turn is primed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.layer {
            Layer::Mid => match self.axis {
                Axis::X => 'M',
                Axis::Y => 'E',
                Axis::Z => 'S',
            },
            Layer::Neg => Face::from_axis_sign(self.axis, Sign::Neg).symbol(),
            Layer::Pos => Face::from_axis_sign(self.axis, Sign::Pos).symbol(),
        };
        write!(f, "{letter}")?;
        if self.direction == Sign::Neg {
            write!(f, "'")?;
        }
        Ok(())
    }
}
