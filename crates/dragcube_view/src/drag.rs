//! Drag-to-turn interpretation.
//!
//! A drag is described by two 3D points on the cube's outer surface: the
//! intersection point recorded on pointer-down and the intersection point
//! under the pointer during the drag. Which face the drag started on decides
//! which two axes count as drag directions; the larger of the two deltas
//! picks the turn axis (always the third axis, neither the face's nor the
//! drag's) and its sign. The sign table is the right-hand-rule consequence
//! of which face normal the pointer is dragging across.

use cgmath::{InnerSpace, Vector3};
use dragcube_core::{Axis, Cubelet, Face, Sign};
use float_ord::FloatOrd;

/// Distance from the cube center beyond which an intersection point counts
/// as lying on an outer face. Cubelet centers span ±1, so outer surfaces sit
/// at ±1.5; anything past 1.4 is comfortably on a face.
pub const FACE_THRESHOLD: f32 = 1.4;

/// Minimum drag distance (grid units) before a direction is recognized,
/// preventing accidental turns from small jitter.
pub const DRAG_DEADZONE: f32 = 0.3;

/// Face classification order for anchor points. First match wins, so a
/// point exactly on a shared edge or corner resolves to whichever face
/// tests first; this is an acknowledged precision limitation.
const FACE_PRIORITY: [Face; 6] = [Face::R, Face::U, Face::F, Face::L, Face::D, Face::B];

/// A face turn inferred from a drag: the axis to rotate about and the
/// direction of the 90° rotation. The layer comes from the anchor cubelet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TurnDirection {
    /// Axis to rotate about.
    pub axis: Axis,
    /// Rotation direction.
    pub direction: Sign,
}

/// Where a drag began: the cubelet under the pointer on pointer-down and the
/// exact intersection point on its surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragAnchor {
    /// Cubelet the pointer ray first hit.
    pub cubelet: Cubelet,
    /// Intersection point on that cubelet's surface, in puzzle space.
    pub point: Vector3<f32>,
}

/// One row of the drag decision table.
#[derive(Debug, Copy, Clone)]
struct DragRule {
    /// Drag axis this rule applies to (one of the two axes parallel to the
    /// anchor face).
    secondary: Axis,
    /// Axis the slice rotates about: the axis that is neither the face's
    /// nor the secondary.
    turn_axis: Axis,
    /// Rotation direction when the drag delta on the secondary axis is
    /// negative; positive deltas take the opposite direction.
    direction_when_negative: Sign,
}

impl DragRule {
    const fn new(secondary: Axis, turn_axis: Axis, direction_when_negative: Sign) -> Self {
        Self {
            secondary,
            turn_axis,
            direction_when_negative,
        }
    }
}

/// Drag decision table, indexed by [`Face`] discriminant. Each face has two
/// rules, one per parallel axis in `x < y < z` order.
const DRAG_TABLE: [[DragRule; 2]; 6] = {
    use Axis::{X, Y, Z};
    use Sign::{Neg, Pos};

    [
        // R (+X)
        [DragRule::new(Y, Z, Pos), DragRule::new(Z, Y, Neg)],
        // L (-X)
        [DragRule::new(Y, Z, Neg), DragRule::new(Z, Y, Pos)],
        // U (+Y)
        [DragRule::new(X, Z, Neg), DragRule::new(Z, X, Pos)],
        // D (-Y)
        [DragRule::new(X, Z, Pos), DragRule::new(Z, X, Neg)],
        // F (+Z)
        [DragRule::new(X, Y, Pos), DragRule::new(Y, X, Neg)],
        // B (-Z)
        [DragRule::new(X, Y, Neg), DragRule::new(Y, X, Pos)],
    ]
};

/// Classifies which outer face an intersection point lies on, testing the
/// faces in the fixed [`FACE_PRIORITY`] order. Returns `None` for points
/// that clear [`FACE_THRESHOLD`] on no axis, which can happen exactly at an
/// edge or corner of the cube.
pub fn face_at(point: Vector3<f32>) -> Option<Face> {
    FACE_PRIORITY
        .into_iter()
        .find(|face| face.normal().dot(point) > FACE_THRESHOLD)
}

/// Interprets a drag from anchor point `p0` to current point `p1`, both on
/// the cube's outer surface. Returns the intended turn direction, or `None`
/// while the drag is ambiguous (anchor not on a recognized face, or both
/// drag deltas inside the deadzone).
///
/// Pure and deterministic: identical point pairs always yield identical
/// results.
pub fn recognize_direction(p0: Vector3<f32>, p1: Vector3<f32>) -> Option<TurnDirection> {
    let face = face_at(p0)?;
    let delta = p0 - p1;

    let [a, b] = DRAG_TABLE[face as usize];
    // Ties go to the later axis, matching the strict comparisons this table
    // was derived from.
    let rule = std::cmp::max_by_key(a, b, |rule| FloatOrd(rule.secondary.component(delta).abs()));

    let drag_amount = rule.secondary.component(delta);
    (drag_amount.abs() > DRAG_DEADZONE).then(|| TurnDirection {
        axis: rule.turn_axis,
        direction: match drag_amount < 0.0 {
            true => rule.direction_when_negative,
            false => rule.direction_when_negative.flip(),
        },
    })
}
