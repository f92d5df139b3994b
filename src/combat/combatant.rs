//! Combatants: the hero and the adversaries share one stat block

use serde::Serialize;

use crate::core::config::{AdversaryScaling, PlayerConfig};
use crate::core::types::{Attack, Health, Level, Side};
use crate::skills::AbilityGraph;

/// Stat block shared by every fighter
///
/// `health` is kept within `0..=max_health` by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combatant {
    name: String,
    level: Level,
    max_health: Health,
    health: Health,
    attack: Attack,
}

impl Combatant {
    /// Create a combatant at full health
    pub fn new(name: impl Into<String>, level: Level, max_health: Health, attack: Attack) -> Self {
        Self {
            name: name.into(),
            level,
            max_health,
            health: max_health,
            attack,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn max_health(&self) -> Health {
        self.max_health
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn attack(&self) -> Attack {
        self.attack
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract damage, clamping at zero
    ///
    /// Damage is unsigned, so this can never heal.
    pub fn apply_damage(&mut self, amount: Health) {
        self.health = self.health.saturating_sub(amount).min(self.max_health);
    }

    /// Set a new level. Zero is rejected and leaves the level unchanged.
    fn set_level(&mut self, level: Level) -> bool {
        if level == 0 {
            return false;
        }
        self.level = level;
        true
    }
}

/// Anything that can stand in a duel
pub trait Fighter {
    fn combatant(&self) -> &Combatant;
    fn combatant_mut(&mut self) -> &mut Combatant;
    fn side(&self) -> Side;

    fn name(&self) -> &str {
        self.combatant().name()
    }

    fn is_alive(&self) -> bool {
        self.combatant().is_alive()
    }
}

/// Stats gained on every level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGrowth {
    pub health: Health,
    pub attack: Attack,
}

impl Default for LevelGrowth {
    fn default() -> Self {
        Self {
            health: 20,
            attack: 5,
        }
    }
}

/// The hero: a combatant that levels up and owns an ability tree
#[derive(Debug, Clone)]
pub struct Player {
    combatant: Combatant,
    growth: LevelGrowth,
    abilities: AbilityGraph,
}

impl Player {
    pub fn new(combatant: Combatant, abilities: AbilityGraph) -> Self {
        Self {
            combatant,
            growth: LevelGrowth::default(),
            abilities,
        }
    }

    pub fn with_growth(mut self, growth: LevelGrowth) -> Self {
        self.growth = growth;
        self
    }

    pub fn from_config(config: &PlayerConfig, abilities: AbilityGraph) -> Self {
        let combatant = Combatant::new(
            config.name.clone(),
            config.level,
            config.max_health,
            config.attack,
        );
        Self::new(combatant, abilities).with_growth(LevelGrowth {
            health: config.health_per_level,
            attack: config.attack_per_level,
        })
    }

    pub fn stats(&self) -> &Combatant {
        &self.combatant
    }

    pub fn level(&self) -> Level {
        self.combatant.level
    }

    pub fn abilities(&self) -> &AbilityGraph {
        &self.abilities
    }

    pub fn abilities_mut(&mut self) -> &mut AbilityGraph {
        &mut self.abilities
    }

    /// Level +1, grow max health and attack, heal to full
    ///
    /// Returns false without touching any stat if the level cannot grow.
    pub fn level_up(&mut self) -> bool {
        let Some(next) = self.combatant.level.checked_add(1) else {
            return false;
        };
        if !self.combatant.set_level(next) {
            return false;
        }
        let c = &mut self.combatant;
        c.max_health = c.max_health.saturating_add(self.growth.health);
        c.health = c.max_health;
        c.attack = c.attack.saturating_add(self.growth.attack);
        tracing::info!(
            "{} reached level {} ({} HP, {} attack)",
            c.name,
            c.level,
            c.max_health,
            c.attack
        );
        true
    }
}

impl Fighter for Player {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    fn side(&self) -> Side {
        Side::Player
    }
}

/// An enemy whose stats are derived from its level at creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adversary {
    combatant: Combatant,
}

impl Adversary {
    /// Adversary with the classic stat curve (30 HP / 8 attack at level 1)
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self::scaled(name, level, &AdversaryScaling::default())
    }

    pub fn scaled(name: impl Into<String>, level: Level, scaling: &AdversaryScaling) -> Self {
        let steps = level.saturating_sub(1);
        let max_health = scaling
            .base_health
            .saturating_add(steps.saturating_mul(scaling.health_per_level));
        let attack = scaling
            .base_attack
            .saturating_add(steps.saturating_mul(scaling.attack_per_level));
        Self {
            combatant: Combatant::new(name, level, max_health, attack),
        }
    }

    pub fn stats(&self) -> &Combatant {
        &self.combatant
    }

    pub fn level(&self) -> Level {
        self.combatant.level
    }
}

impl Fighter for Adversary {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    fn side(&self) -> Side {
        Side::Adversary
    }
}
