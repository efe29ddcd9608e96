//! Cube simulation: lattice state plus the animated turn state machine.

use std::collections::VecDeque;

use cgmath::{Decomposed, Deg, Quaternion, Vector3};
use dragcube_core::{Lattice, LatticeError, LatticeState, ScrambleParams, TURN_ANGLE, Turn};
use web_time::{Duration, Instant};

use crate::TurnPreferences;
use crate::animations::TurnAnimationState;

const ASSUMED_FPS: f32 = 120.0;

/// Cube simulation: the latest lattice state, the turn state machine with
/// its interaction lock, and the queue of scripted (scramble) turns.
///
/// The simulation is advanced cooperatively: the owner calls
/// [`step`](Self::step) (or [`step_with_delta`](Self::step_with_delta) with
/// a synthetic delta) once per frame. A turn runs to completion once
/// started; there is no cancellation path.
#[derive(Debug, Clone)]
pub struct CubeSimulation {
    /// Latest lattice state, not including any transient rotation.
    latest_state: LatticeState,

    /// Turn animation state machine.
    turn_anim: TurnAnimationState,
    /// Scripted turns waiting to be played, front first. Drained one turn
    /// per return to idle, so each turn fully commits before the next
    /// starts.
    pending_turns: VecDeque<Turn>,
    /// Maximum recent queue depth (reset when the queue drains).
    queue_max: usize,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,

    /// Interaction preferences.
    pub prefs: TurnPreferences,
}
impl Default for CubeSimulation {
    fn default() -> Self {
        Self::new()
    }
}
impl CubeSimulation {
    /// Constructs a solved, idle simulation.
    pub fn new() -> Self {
        Self {
            latest_state: LatticeState::new(Lattice::new()),
            turn_anim: TurnAnimationState::default(),
            pending_turns: VecDeque::new(),
            queue_max: 0,
            last_frame_time: None,
            prefs: TurnPreferences::default(),
        }
    }

    /// Returns the latest lattice state, after all turns have committed.
    pub fn lattice(&self) -> &LatticeState {
        &self.latest_state
    }

    /// Returns whether the puzzle is solved. Meaningful only between turns;
    /// the shell queries this after a turn commits.
    pub fn is_solved(&self) -> bool {
        self.latest_state.is_solved()
    }

    /// Returns whether the interaction lock is held (a turn is active).
    /// Pointer input received while locked must be dropped.
    pub fn is_locked(&self) -> bool {
        !self.turn_anim.is_idle()
    }

    /// Returns whether the simulation needs further ticks: a turn is active
    /// or scripted turns are pending.
    pub fn is_animating(&self) -> bool {
        self.is_locked() || !self.pending_turns.is_empty()
    }

    /// Starts a turn if the interaction lock is free. Returns whether the
    /// turn began; a request arriving while locked is dropped, not queued.
    ///
    /// Fails only on a lattice-consistency violation, in which case nothing
    /// is rotated.
    pub fn try_begin_turn(&mut self, turn: Turn) -> Result<bool, LatticeError> {
        if self.is_locked() {
            log::trace!("turn {turn} dropped: a turn is already in progress");
            return Ok(false);
        }
        let group = self.latest_state.slice(turn.axis, turn.layer.coord())?;
        log::debug!("beginning turn {turn}");
        self.turn_anim = TurnAnimationState::begin(turn, group);
        Ok(true)
    }

    /// Queues a scripted scramble. The generated turns play sequentially,
    /// each committing before the next starts. Replaces any turns still
    /// queued, but never interrupts the active turn.
    pub fn scramble(&mut self, params: ScrambleParams) {
        let turns = params.turns();
        log::debug!(
            "scrambling: {} turns from seed {}",
            turns.len(),
            params.seed,
        );
        self.pending_turns = turns.into();
    }

    /// Queues a single random turn.
    pub fn scramble_once(&mut self) {
        self.scramble(ScrambleParams::with_length(1));
    }

    /// Advances the simulation to the next frame, measuring the time since
    /// the previous call. Returns whether the puzzle must be redrawn.
    pub fn step(&mut self) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };
        let needs_redraw = self.step_with_delta(delta);
        self.last_frame_time = needs_redraw.then_some(now);
        needs_redraw
    }

    /// Advances the simulation by a caller-supplied time delta. Returns
    /// whether the puzzle must be redrawn.
    pub fn step_with_delta(&mut self, delta: Duration) -> bool {
        // Start the next scripted turn once the previous one has fully
        // settled.
        if self.turn_anim.is_idle() {
            match self.pending_turns.pop_front() {
                Some(turn) => {
                    if let Err(e) = self.try_begin_turn(turn) {
                        log::error!("aborting scripted turns: {e}");
                        self.pending_turns.clear();
                    }
                }
                None => self.queue_max = 0,
            }
        }
        self.queue_max = self
            .queue_max
            .max(self.pending_turns.len() + usize::from(self.is_locked()));

        let needs_redraw = self.turn_anim.proceed(delta, &self.prefs, self.queue_max);

        if matches!(self.turn_anim, TurnAnimationState::Committing { .. }) {
            self.commit_active_turn();
        }

        needs_redraw
    }

    /// Flattens the finished turn into the lattice and releases the
    /// interaction lock.
    fn commit_active_turn(&mut self) {
        let TurnAnimationState::Committing { anim } = std::mem::take(&mut self.turn_anim) else {
            return;
        };
        // The commit rotates by the turn's exact ±90° and snaps every
        // position back onto the integer grid, so no interpolation error
        // survives into the next slice computation.
        self.latest_state.commit(&anim.group, anim.turn);
        log::debug!("committed turn {}; solved={}", anim.turn, self.is_solved());
    }

    /// Returns the world transform of every cubelet for this frame, in
    /// cubelet order: the committed lattice transform, with the transient
    /// pivot rotation composed on top for the slice of an active turn.
    pub fn cubelet_transforms(&self) -> Vec<Decomposed<Vector3<f32>, Quaternion<f32>>> {
        let pivot = self.turn_anim.current().map(|(anim, progress)| {
            let t = self.prefs.interpolation.interpolate(progress);
            (anim, anim.turn.rotation_at(Deg(TURN_ANGLE.0 * t)))
        });
        self.latest_state
            .ty()
            .cubelets()
            .map(|cubelet| {
                let state = &self.latest_state[cubelet];
                let mut rot = state.orientation;
                let mut disp = state.position;
                if let Some((anim, pivot_rotation)) = &pivot {
                    if anim.group.contains(&cubelet) {
                        rot = pivot_rotation * rot;
                        disp = pivot_rotation * disp;
                    }
                }
                Decomposed {
                    scale: 1.0,
                    rot,
                    disp,
                }
            })
            .collect()
    }
}
