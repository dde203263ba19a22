//! Dice for battles and compensation picks.
//!
//! ## Key Features
//!
//! - **Injected**: the rules only see the `DiceSource` trait
//! - **Seedable**: `GameRng::new(seed)` replays the same rolls
//! - **Scriptable**: `ScriptedDice` feeds fixed values for tests
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use space_tac_toe::core::{DiceSource, GameRng, ScriptedDice};
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll(10);
//! assert!((1..=10).contains(&roll));
//!
//! // Attacker rolls 8, defender rolls 3
//! let mut dice = ScriptedDice::new([8, 3]);
//! assert_eq!(dice.roll(10), 8);
//! assert_eq!(dice.roll(10), 3);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Source of randomness for the rules.
///
/// Live play uses `GameRng`. Tests substitute `ScriptedDice`.
pub trait DiceSource {
    /// Roll a die with `sides` faces, uniform in `1..=sides`.
    fn roll(&mut self, sides: u8) -> u8;

    /// Pick an index uniformly in `0..len`.
    ///
    /// Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self, sides: u8) -> u8 {
        (**self).roll(sides)
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// ChaCha8-backed dice.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// Interactive sessions use this; rolls are not reproducible.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceSource for GameRng {
    fn roll(&mut self, sides: u8) -> u8 {
        self.inner.gen_range(1..=sides.max(1))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Dice that replay a fixed sequence.
///
/// Each call to `roll` or `pick` consumes the next value. Rolls are
/// clamped into `1..=sides` and picks reduced modulo `len`, so any script
/// yields legal values. An exhausted script keeps returning its last value
/// (or 1 if it was empty).
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    values: VecDeque<usize>,
    last: usize,
}

impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 1,
        }
    }

    /// Values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next_value(&mut self) -> usize {
        if let Some(v) = self.values.pop_front() {
            self.last = v;
        }
        self.last
    }
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, sides: u8) -> u8 {
        let sides = sides.max(1);
        self.next_value().clamp(1, sides as usize) as u8
    }

    fn pick(&mut self, len: usize) -> usize {
        self.next_value() % len.max(1)
    }
}
