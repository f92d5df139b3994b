//! Encounter resolution
//!
//! Drives the ladder: fight every adversary of the active tier, level up,
//! offer abilities, then climb to the next tier the registry can supply.

use serde::Serialize;

use crate::combat::{resolve_attack, Adversary, Combatant, Fighter, Player, RollSource};
use crate::core::error::Result;
use crate::core::types::Level;
use crate::encounter::control::{AbilityChooser, TurnGate};
use crate::encounter::events::{EventSink, GameEvent};
use crate::registry::AdversaryRegistry;

/// The external collaborators a session talks to
pub struct SessionIo<'a> {
    pub rolls: &'a mut dyn RollSource,
    pub gate: &'a mut dyn TurnGate,
    pub chooser: &'a mut dyn AbilityChooser,
    pub sink: &'a mut dyn EventSink,
}

/// Result of a single duel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    AdversaryDefeated { exchanges: u32 },
    PlayerDefeated { exchanges: u32 },
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SessionOutcome {
    /// No tier remains at or above the next level
    Victory,
    /// The player fell
    Defeat { tier_level: Level, slain_by: String },
}

/// End-of-session report
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub outcome: SessionOutcome,
    pub player: Combatant,
    pub tiers_cleared: Vec<Level>,
    pub adversaries_defeated: u32,
    pub exchanges: u32,
    pub abilities: Vec<String>,
}

impl SessionSummary {
    pub fn is_victory(&self) -> bool {
        self.outcome == SessionOutcome::Victory
    }
}

enum TierOutcome {
    Cleared,
    Fallen { slain_by: String },
}

#[derive(Default)]
struct Tally {
    tiers_cleared: Vec<Level>,
    adversaries_defeated: u32,
    exchanges: u32,
}

/// Runs sessions against a read-only registry
pub struct EncounterResolver<'r> {
    registry: &'r AdversaryRegistry,
    danger_ratio: f32,
}

impl<'r> EncounterResolver<'r> {
    pub fn new(registry: &'r AdversaryRegistry) -> Self {
        Self {
            registry,
            danger_ratio: 1.0,
        }
    }

    /// Tier/player level ratio above which entering a tier emits a warning
    pub fn with_danger_ratio(mut self, ratio: f32) -> Self {
        self.danger_ratio = ratio;
        self
    }

    /// Tier the session opens with: the player's level, else the next one up
    pub fn first_tier(&self, player_level: Level) -> Option<&'r [Adversary]> {
        self.registry.tier_at_or_above(player_level)
    }

    /// Tier after `cleared`: exactly one level up, else the next one up
    pub fn next_tier(&self, cleared: Level) -> Option<&'r [Adversary]> {
        self.registry
            .find_exact(cleared.saturating_add(1))
            .or_else(|| self.registry.find_next_higher(cleared))
    }

    /// Play the ladder until the player falls or the registry runs out
    pub fn run(&self, player: &mut Player, io: &mut SessionIo<'_>) -> Result<SessionSummary> {
        let mut tally = Tally::default();
        let mut tier = self.first_tier(player.level());

        let outcome = loop {
            let Some(adversaries) = tier else {
                tracing::info!("No adversaries left above level {}", player.level());
                io.sink.emit(&GameEvent::Victory {
                    level: player.level(),
                });
                break SessionOutcome::Victory;
            };
            let level = adversaries[0].level();

            match self.clear_tier(player, adversaries, io, &mut tally)? {
                TierOutcome::Fallen { slain_by } => {
                    break SessionOutcome::Defeat {
                        tier_level: level,
                        slain_by,
                    };
                }
                TierOutcome::Cleared => {
                    tally.tiers_cleared.push(level);
                    io.sink.emit(&GameEvent::TierCleared { level });
                    self.level_up(player, io);
                    self.offer_abilities(player, io)?;
                    tier = self.next_tier(level);
                }
            }
        };

        Ok(SessionSummary {
            outcome,
            player: player.stats().clone(),
            tiers_cleared: tally.tiers_cleared,
            adversaries_defeated: tally.adversaries_defeated,
            exchanges: tally.exchanges,
            abilities: player.abilities().unlocked_names(),
        })
    }

    /// Fight one adversary to the end, player striking first
    pub fn fight(
        &self,
        player: &mut Player,
        adversary: &mut Adversary,
        io: &mut SessionIo<'_>,
    ) -> Result<DuelOutcome> {
        io.sink.emit(&GameEvent::DuelStarted {
            adversary: adversary.name().to_string(),
            level: adversary.level(),
            health: adversary.stats().health(),
        });

        let mut exchanges = 0;
        loop {
            io.gate.advance()?;
            exchanges += 1;

            let report = resolve_attack(&*player, &mut *adversary, io.rolls.roll_d20());
            io.sink.emit(&GameEvent::Attack(report));
            if !adversary.is_alive() {
                io.sink.emit(&GameEvent::AdversaryDefeated {
                    name: adversary.name().to_string(),
                });
                return Ok(DuelOutcome::AdversaryDefeated { exchanges });
            }

            let report = resolve_attack(&*adversary, &mut *player, io.rolls.roll_d20());
            io.sink.emit(&GameEvent::Attack(report));
            if !player.is_alive() {
                io.sink.emit(&GameEvent::PlayerDefeated {
                    slain_by: adversary.name().to_string(),
                });
                return Ok(DuelOutcome::PlayerDefeated { exchanges });
            }
        }
    }

    fn clear_tier(
        &self,
        player: &mut Player,
        adversaries: &[Adversary],
        io: &mut SessionIo<'_>,
        tally: &mut Tally,
    ) -> Result<TierOutcome> {
        let level = adversaries[0].level();
        tracing::debug!("Entering tier {} ({} adversaries)", level, adversaries.len());
        io.sink.emit(&GameEvent::TierEntered {
            level,
            adversaries: adversaries.iter().map(|a| a.name().to_string()).collect(),
        });
        self.warn_if_dangerous(level, player.level(), io);

        // The registry stays untouched; fights happen on copies.
        for template in adversaries {
            let mut adversary = template.clone();
            match self.fight(player, &mut adversary, io)? {
                DuelOutcome::AdversaryDefeated { exchanges } => {
                    tally.exchanges += exchanges;
                    tally.adversaries_defeated += 1;
                }
                DuelOutcome::PlayerDefeated { exchanges } => {
                    tally.exchanges += exchanges;
                    tracing::info!("{} fell to {}", player.name(), adversary.name());
                    return Ok(TierOutcome::Fallen {
                        slain_by: adversary.name().to_string(),
                    });
                }
            }
        }
        Ok(TierOutcome::Cleared)
    }

    fn warn_if_dangerous(&self, tier_level: Level, player_level: Level, io: &mut SessionIo<'_>) {
        let factor = tier_level as f32 / player_level.max(1) as f32;
        if factor > self.danger_ratio {
            tracing::warn!(
                "Tier {} is {:.2}x the player's level {}",
                tier_level,
                factor,
                player_level
            );
            io.sink.emit(&GameEvent::TierDangerous {
                tier_level,
                player_level,
                factor,
            });
        }
    }

    fn level_up(&self, player: &mut Player, io: &mut SessionIo<'_>) {
        if player.level_up() {
            let stats = player.stats();
            io.sink.emit(&GameEvent::LevelUp {
                level: stats.level(),
                max_health: stats.max_health(),
                attack: stats.attack(),
            });
        }
    }

    /// Let the player unlock abilities until the chooser declines
    pub fn offer_abilities(&self, player: &mut Player, io: &mut SessionIo<'_>) -> Result<()> {
        loop {
            let statuses = player.abilities().statuses();
            io.sink.emit(&GameEvent::AbilityTree {
                statuses: statuses.clone(),
            });

            let Some(choice) = io.chooser.choose(&statuses)? else {
                return Ok(());
            };

            match player.abilities_mut().try_unlock(&choice) {
                Ok(()) => {
                    tracing::info!("{} unlocked {}", player.name(), choice);
                    io.sink.emit(&GameEvent::AbilityUnlocked { name: choice });
                }
                Err(rejection) => {
                    tracing::debug!("Unlock rejected: {}", rejection);
                    io.sink.emit(&GameEvent::UnlockRejected(rejection));
                }
            }
        }
    }
}
