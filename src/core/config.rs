//! Game configuration with documented constants
//!
//! Every tunable number of the ladder lives here. The defaults reproduce the
//! classic game: a 100 HP hero facing a Goblin, a Troll and an Orc.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{GameError, Result};
use crate::core::types::{Attack, Health, Level};

/// Starting stats and level-up growth for the hero
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub level: Level,
    pub max_health: Health,
    pub attack: Attack,
    /// Max health gained on every level-up
    pub health_per_level: Health,
    /// Attack gained on every level-up
    pub attack_per_level: Attack,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Herói".to_string(),
            level: 1,
            max_health: 100,
            attack: 10,
            health_per_level: 20,
            attack_per_level: 5,
        }
    }
}

/// Stat derivation for adversaries
///
/// An adversary of level L gets
/// `base_health + (L - 1) * health_per_level` hit points and
/// `base_attack + (L - 1) * attack_per_level` attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdversaryScaling {
    pub base_health: Health,
    pub health_per_level: Health,
    pub base_attack: Attack,
    pub attack_per_level: Attack,
}

impl Default for AdversaryScaling {
    fn default() -> Self {
        Self {
            base_health: 30,
            health_per_level: 20,
            base_attack: 8,
            attack_per_level: 5,
        }
    }
}

/// One adversary to place in the registry at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub level: Level,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// One node of the ability tree as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityDefinition {
    pub name: String,
    #[serde(default)]
    pub unlocks: Vec<String>,
}

impl AbilityDefinition {
    pub fn new(name: &str, unlocks: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            unlocks: unlocks.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    /// Node that starts unlocked
    pub root: String,
    #[serde(rename = "node")]
    pub nodes: Vec<AbilityDefinition>,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            root: "Raiz".to_string(),
            nodes: vec![
                AbilityDefinition::new("Raiz", &["Golpe", "Bloqueio"]),
                AbilityDefinition::new("Golpe", &["Golpe Poderoso"]),
                AbilityDefinition::new("Bloqueio", &["Investida com Escudo"]),
                AbilityDefinition::new("Golpe Poderoso", &[]),
                AbilityDefinition::new("Investida com Escudo", &[]),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for the d20. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Tier/player level ratio above which a danger warning is emitted
    ///
    /// At 1.0 any tier strictly above the player's level warns.
    pub danger_ratio: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            danger_ratio: 1.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub adversaries: AdversaryScaling,
    pub roster: Vec<RosterEntry>,
    pub abilities: AbilityConfig,
    pub session: SessionConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            adversaries: AdversaryScaling::default(),
            roster: vec![
                RosterEntry::new("Goblin", 1),
                RosterEntry::new("Orc", 3),
                RosterEntry::new("Troll", 2),
            ],
            abilities: AbilityConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would break combatant invariants
    pub fn validate(&self) -> Result<()> {
        let player = &self.player;
        if player.level == 0 {
            return Err(GameError::InvalidConfig("player level must be positive".into()));
        }
        if player.max_health == 0 || player.attack == 0 {
            return Err(GameError::InvalidConfig(
                "player max_health and attack must be positive".into(),
            ));
        }
        if self.adversaries.base_health == 0 || self.adversaries.base_attack == 0 {
            return Err(GameError::InvalidConfig(
                "adversary base_health and base_attack must be positive".into(),
            ));
        }
        if !self.session.danger_ratio.is_finite() || self.session.danger_ratio < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "danger_ratio must be a non-negative number, got {}",
                self.session.danger_ratio
            )));
        }
        for entry in &self.roster {
            if entry.name.trim().is_empty() {
                return Err(GameError::InvalidConfig("roster entry with empty name".into()));
            }
            if entry.level == 0 {
                return Err(GameError::InvalidConfig(format!(
                    "roster entry '{}' has level 0",
                    entry.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_game() {
        let config = GameConfig::default();
        assert_eq!(config.player.max_health, 100);
        assert_eq!(config.player.attack, 10);
        assert_eq!(config.roster.len(), 3);
        assert_eq!(config.abilities.root, "Raiz");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [player]
            name = "Ana"
            max_health = 500

            [[roster]]
            name = "Slime"
            level = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.player.name, "Ana");
        assert_eq!(config.player.max_health, 500);
        assert_eq!(config.player.attack, 10);
        assert_eq!(config.roster, vec![RosterEntry::new("Slime", 1)]);
        assert_eq!(config.adversaries, AdversaryScaling::default());
    }

    #[test]
    fn test_ability_nodes_from_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            [abilities]
            root = "Base"

            [[abilities.node]]
            name = "Base"
            unlocks = ["Jab"]

            [[abilities.node]]
            name = "Jab"
            "#,
        )
        .unwrap();

        assert_eq!(config.abilities.root, "Base");
        assert_eq!(config.abilities.nodes.len(), 2);
        assert!(config.abilities.nodes[1].unlocks.is_empty());
    }

    #[test]
    fn test_zero_level_roster_rejected() {
        let result = GameConfig::from_toml_str(
            r#"
            [[roster]]
            name = "Ghost"
            level = 0
            "#,
        );
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = GameConfig::from_toml_str("[player\nname = 1");
        assert!(matches!(result, Err(GameError::TomlError(_))));
    }
}
