//! Deterministic scramble generation.

use itertools::Itertools;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Turn;

/// Default number of turns in a full scramble.
pub const FULL_SCRAMBLE_LENGTH: u32 = 20;

/// Parameters to deterministically generate a turn sequence to scramble the
/// puzzle. Equal parameters always generate equal sequences.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Random seed.
    pub seed: u64,
    /// Number of turns to generate.
    pub length: u32,
}
impl ScrambleParams {
    /// Generates parameters for a full scramble, seeded from OS randomness.
    pub fn new() -> Self {
        Self::with_length(FULL_SCRAMBLE_LENGTH)
    }

    /// Generates parameters for a scramble of `length` turns, seeded from OS
    /// randomness.
    pub fn with_length(length: u32) -> Self {
        Self {
            seed: rand::rng().random(),
            length,
        }
    }

    /// Generates the turn sequence for these parameters.
    ///
    /// The seed material is hashed and the digest feeds a ChaCha12 stream,
    /// so the sequence is stable across platforms and releases.
    pub fn turns(self) -> Vec<Turn> {
        let digest = Sha256::digest(self.seed.to_le_bytes());
        let mut rng = rand_chacha::ChaCha12Rng::from_seed(digest.into());

        let all_turns = Turn::all().collect_vec();
        std::iter::from_fn(|| all_turns.choose(&mut rng).copied())
            .take(self.length as usize)
            .collect()
    }
}
impl Default for ScrambleParams {
    fn default() -> Self {
        Self::new()
    }
}
