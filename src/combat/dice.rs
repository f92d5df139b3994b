//! The d20 and the sources that roll it

use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::combat::constants::D20_SIDES;
use crate::core::error::{GameError, Result};

/// A single d20 result, always within `1..=20`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Roll(u8);

impl Roll {
    pub const MIN: Roll = Roll(1);
    pub const MAX: Roll = Roll(D20_SIDES);

    pub fn new(value: u8) -> Result<Self> {
        if (1..=D20_SIDES).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GameError::RollOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Roll {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self> {
        Roll::new(value)
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Injected source of d20 rolls
pub trait RollSource {
    fn roll_d20(&mut self) -> Roll;
}

/// Rolls a fair d20 from any `rand` generator
pub struct RngRoller<R: Rng> {
    rng: R,
}

impl<R: Rng> RngRoller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRoller<ChaCha8Rng> {
    /// Reproducible roller for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RollSource for RngRoller<R> {
    fn roll_d20(&mut self) -> Roll {
        Roll(self.rng.gen_range(1..=D20_SIDES))
    }
}

/// Replays a fixed sequence of rolls, then repeats a fallback
pub struct ScriptedRolls {
    queue: VecDeque<Roll>,
    fallback: Roll,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = Roll>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback: Roll::MIN,
        }
    }

    /// Build from raw values, rejecting anything outside `1..=20`
    pub fn from_values(values: &[u8]) -> Result<Self> {
        let rolls = values
            .iter()
            .map(|&v| Roll::new(v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rolls))
    }

    /// Always rolls `roll`
    pub fn constant(roll: Roll) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: roll,
        }
    }

    /// Roll returned once the script runs out (defaults to a 1)
    pub fn with_fallback(mut self, fallback: Roll) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for ScriptedRolls {
    fn roll_d20(&mut self) -> Roll {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
