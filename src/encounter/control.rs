//! Player-side collaborators: the turn gate and the ability chooser

use std::collections::VecDeque;

use crate::core::error::Result;
use crate::skills::AbilityStatus;

/// Blocks until the next attack exchange may proceed
pub trait TurnGate {
    fn advance(&mut self) -> Result<()>;
}

/// Picks the next ability to unlock after a tier is cleared
pub trait AbilityChooser {
    /// `None` ends the unlock round
    fn choose(&mut self, statuses: &[AbilityStatus]) -> Result<Option<String>>;
}

/// Never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoAdvance;

impl TurnGate for AutoAdvance {
    fn advance(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Counts exchanges without waiting
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingGate {
    pub exchanges: u32,
}

impl TurnGate for CountingGate {
    fn advance(&mut self) -> Result<()> {
        self.exchanges += 1;
        Ok(())
    }
}

/// Declines every unlock round
#[derive(Debug, Default, Clone, Copy)]
pub struct SkipAbilities;

impl AbilityChooser for SkipAbilities {
    fn choose(&mut self, _statuses: &[AbilityStatus]) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Unlocks the first available locked ability each time it is asked
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyChooser {
    /// Picks allowed per unlock round
    pub per_round: usize,
    taken: usize,
}

impl GreedyChooser {
    pub fn new(per_round: usize) -> Self {
        Self { per_round, taken: 0 }
    }
}

impl AbilityChooser for GreedyChooser {
    fn choose(&mut self, statuses: &[AbilityStatus]) -> Result<Option<String>> {
        let pick = statuses.iter().find(|s| !s.unlocked && s.available);
        match pick {
            Some(status) if self.taken < self.per_round => {
                self.taken += 1;
                Ok(Some(status.name.clone()))
            }
            _ => {
                self.taken = 0;
                Ok(None)
            }
        }
    }
}

/// Replays fixed answers; each round ends at a `None` entry or when the
/// script runs out
#[derive(Debug, Default, Clone)]
pub struct ScriptedChooser {
    answers: VecDeque<Option<String>>,
}

impl ScriptedChooser {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
        }
    }
}

impl AbilityChooser for ScriptedChooser {
    fn choose(&mut self, _statuses: &[AbilityStatus]) -> Result<Option<String>> {
        Ok(self.answers.pop_front().flatten())
    }
}
