//! Combat: stat blocks, the d20 and the tiered damage rule

pub mod combatant;
pub mod constants;
pub mod damage;
pub mod dice;

pub use combatant::{Adversary, Combatant, Fighter, LevelGrowth, Player};
pub use damage::{resolve_attack, roll_damage, AttackReport, HitTier};
pub use dice::{RngRoller, Roll, RollSource, ScriptedRolls};
