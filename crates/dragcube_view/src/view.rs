//! View into a cube simulation: pointer gestures in, slice turns out.

use std::sync::Arc;

use cgmath::Vector3;
use dragcube_core::{Cubelet, LatticeError, Layer, ScrambleParams, Turn};
use parking_lot::Mutex;

use crate::drag::{self, DragAnchor};
use crate::simulation::CubeSimulation;

/// First hit of a pointer ray against the cubelet meshes, as reported by
/// the rendering shell's ray caster.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    /// Cubelet that was hit.
    pub cubelet: Cubelet,
    /// Intersection point on the cubelet's surface, in puzzle space.
    pub point: Vector3<f32>,
}

/// View into a cube simulation, which receives pointer gestures from the
/// shell and turns them into slice turns.
#[derive(Debug)]
pub struct CubeView {
    /// Simulation state. This is wrapped in an `Arc<Mutex<T>>` so that
    /// multiple views can share the same simulation.
    pub sim: Arc<Mutex<CubeSimulation>>,

    /// Anchor of the drag in progress, if any.
    drag_anchor: Option<DragAnchor>,
}
impl CubeView {
    /// Constructs a new view onto an existing simulation.
    pub fn new(sim: &Arc<Mutex<CubeSimulation>>) -> Self {
        Self {
            sim: Arc::clone(sim),
            drag_anchor: None,
        }
    }

    /// Returns the anchor of the drag in progress, if any.
    pub fn drag_anchor(&self) -> Option<DragAnchor> {
        self.drag_anchor
    }

    /// Handles a pointer-down event. A hit on a cubelet while interaction
    /// is unlocked records the drag anchor; anything else is ignored.
    pub fn on_pointer_down(&mut self, hit: Option<RayHit>) {
        if self.sim.lock().is_locked() {
            log::trace!("pointer down ignored: turn in progress");
            return;
        }
        self.drag_anchor = hit.map(|hit| DragAnchor {
            cubelet: hit.cubelet,
            point: hit.point,
        });
    }

    /// Handles a pointer-move event. Once the drag from the anchor exceeds
    /// the deadzone in a recognized direction, the anchor is consumed and
    /// the corresponding slice turn starts.
    ///
    /// Fails only on a lattice-consistency violation; the ambiguous cases
    /// (no anchor, no hit, drag inside the deadzone) are quietly no-ops.
    pub fn on_pointer_move(&mut self, hit: Option<RayHit>) -> eyre::Result<()> {
        let Some(anchor) = self.drag_anchor else {
            return Ok(());
        };
        // The pointer may leave the cube mid-drag; keep the anchor and wait
        // for it to come back.
        let Some(hit) = hit else {
            return Ok(());
        };
        let Some(direction) = drag::recognize_direction(anchor.point, hit.point) else {
            return Ok(());
        };
        self.drag_anchor = None;

        let sim = &mut *self.sim.lock();
        let coord = direction.axis.component(sim.lattice()[anchor.cubelet].position);
        let layer = Layer::from_coord(coord).ok_or(LatticeError::OffGrid {
            cubelet: anchor.cubelet,
            axis: direction.axis,
            coord,
        })?;
        let turn = Turn {
            axis: direction.axis,
            direction: direction.direction,
            layer,
        };
        // A request racing a scripted turn is dropped by the lock.
        sim.try_begin_turn(turn)?;
        Ok(())
    }

    /// Handles a pointer-up event: abandons the drag in progress, if any.
    pub fn on_pointer_up(&mut self) {
        self.drag_anchor = None;
    }

    /// Returns whether the puzzle is solved. Queried by the shell after a
    /// turn commits to trigger win presentation.
    pub fn is_solved(&self) -> bool {
        self.sim.lock().is_solved()
    }

    /// Issues `n` random turns, played sequentially.
    pub fn randomize(&self, n: u32) {
        self.sim.lock().scramble(ScrambleParams::with_length(n));
    }

    /// Issues one random turn.
    pub fn randomize_once(&self) {
        self.sim.lock().scramble_once();
    }
}

#[cfg(test)]
mod tests {
    use cgmath::vec3;
    use dragcube_core::{Axis, Sign};
    use web_time::Duration;

    use super::*;

    fn new_view() -> CubeView {
        let mut sim = CubeSimulation::new();
        sim.prefs.dynamic_turn_speed = false;
        CubeView::new(&Arc::new(Mutex::new(sim)))
    }

    fn hit_at(view: &CubeView, cell: Vector3<f32>, point: Vector3<f32>) -> Option<RayHit> {
        let cubelet = view.sim.lock().lattice().cubelet_at(cell)?;
        Some(RayHit { cubelet, point })
    }

    fn settle(view: &CubeView) {
        let sim = &mut *view.sim.lock();
        let mut ticks = 0;
        while sim.is_animating() {
            sim.step_with_delta(Duration::from_millis(50));
            ticks += 1;
            assert!(ticks < 10_000, "simulation never settled");
        }
    }

    #[test]
    fn test_drag_starts_a_turn() {
        let mut view = new_view();
        let hit = hit_at(&view, vec3(1.0, 1.0, 1.0), vec3(1.5, 1.05, 0.95));
        view.on_pointer_down(hit);
        assert!(view.drag_anchor().is_some());

        // Drag down the +X face: turn about Z, slice at the anchor's z.
        let moved = hit_at(&view, vec3(1.0, 1.0, 1.0), vec3(1.5, 0.5, 0.95));
        view.on_pointer_move(moved).unwrap();
        assert!(view.drag_anchor().is_none(), "anchor consumed");
        assert!(view.sim.lock().is_locked());

        settle(&view);
        assert!(!view.is_solved());
    }

    #[test]
    fn test_small_drag_keeps_anchor() {
        let mut view = new_view();
        let hit = hit_at(&view, vec3(1.0, 1.0, 1.0), vec3(1.5, 1.05, 0.95));
        view.on_pointer_down(hit);
        let wiggle = hit_at(&view, vec3(1.0, 1.0, 1.0), vec3(1.5, 0.95, 1.05));
        view.on_pointer_move(wiggle).unwrap();
        assert!(view.drag_anchor().is_some());
        assert!(!view.sim.lock().is_locked());
    }

    #[test]
    fn test_pointer_up_abandons_drag() {
        let mut view = new_view();
        let hit = hit_at(&view, vec3(1.0, 1.0, 1.0), vec3(1.5, 1.05, 0.95));
        view.on_pointer_down(hit);
        view.on_pointer_up();
        assert!(view.drag_anchor().is_none());

        // A later move with no anchor is a no-op.
        let moved = hit_at(&view, vec3(1.0, 1.0, 1.0), vec3(1.5, 0.5, 0.95));
        view.on_pointer_move(moved).unwrap();
        assert!(!view.sim.lock().is_locked());
    }

    #[test]
    fn test_pointer_down_ignored_while_locked() {
        let mut view = new_view();
        view.sim
            .lock()
            .try_begin_turn(Turn {
                axis: Axis::X,
                direction: Sign::Pos,
                layer: Layer::Pos,
            })
            .unwrap();

        let hit = hit_at(&view, vec3(-1.0, -1.0, -1.0), vec3(-1.5, -1.05, -0.95));
        view.on_pointer_down(hit);
        assert!(view.drag_anchor().is_none());
    }

    #[test]
    fn test_randomize_then_unsolved() {
        let view = new_view();
        assert!(view.is_solved());
        view.randomize(20);
        settle(&view);
        assert!(!view.is_solved());
    }
}
