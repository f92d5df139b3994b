//! Game assembly: turns a config into a player, a registry and a resolver

use crate::combat::Player;
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::encounter::{EncounterResolver, SessionIo, SessionSummary};
use crate::registry::AdversaryRegistry;
use crate::skills::AbilityGraph;

/// Everything a session needs, built once at startup
pub struct Game {
    pub player: Player,
    pub registry: AdversaryRegistry,
    pub danger_ratio: f32,
}

impl Game {
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let abilities = AbilityGraph::from_config(&config.abilities)?;
        let player = Player::from_config(&config.player, abilities);
        let registry = AdversaryRegistry::from_roster(&config.roster, &config.adversaries);

        tracing::info!(
            "Game ready: {} adversaries in tiers {:?}",
            registry.len(),
            registry.levels()
        );

        Ok(Self {
            player,
            registry,
            danger_ratio: config.session.danger_ratio,
        })
    }

    /// Run one session to victory or defeat
    pub fn play(&mut self, io: &mut SessionIo<'_>) -> Result<SessionSummary> {
        let resolver = EncounterResolver::new(&self.registry).with_danger_ratio(self.danger_ratio);
        resolver.run(&mut self.player, io)
    }
}
