//! Core type definitions used throughout the codebase

/// Difficulty / experience level. Registry tiers are keyed by this.
pub type Level = u32;

/// Hit points
pub type Health = u32;

/// Attack power, the base of every damage roll
pub type Attack = u32;

/// Which side of a duel a combatant fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Side {
    Player,
    Adversary,
}
