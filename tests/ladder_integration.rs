//! End-to-end ladder tests
//!
//! These drive whole sessions through the public API with scripted dice so
//! every outcome is deterministic.

use d20_ladder::combat::{Adversary, Combatant, Fighter, Player, Roll, RngRoller, ScriptedRolls};
use d20_ladder::core::config::{GameConfig, RosterEntry};
use d20_ladder::encounter::{
    AutoAdvance, CountingGate, EncounterResolver, EventLog, GameEvent, GreedyChooser, NullSink,
    SessionIo, SessionOutcome, SkipAbilities,
};
use d20_ladder::game::Game;
use d20_ladder::registry::AdversaryRegistry;
use d20_ladder::skills::AbilityGraph;

/// Player (level 1, 500 HP, atk 10) vs a lone level-1 adversary, player
/// always rolling 20 and the adversary always rolling 1.
#[test]
fn test_two_turn_victory_then_level_up() {
    let mut registry = AdversaryRegistry::new();
    registry.insert(Adversary::new("Goblin", 1));
    let goblin = &registry.find_exact(1).unwrap()[0];
    assert_eq!(goblin.stats().max_health(), 30);
    assert_eq!(goblin.stats().attack(), 8);

    let mut player = Player::new(Combatant::new("Herói", 1, 500, 10), AbilityGraph::standard());
    let mut rolls = ScriptedRolls::from_values(&[20, 1, 20, 1]).unwrap();
    let mut gate = CountingGate::default();
    let mut log = EventLog::new();
    let mut io = SessionIo {
        rolls: &mut rolls,
        gate: &mut gate,
        chooser: &mut SkipAbilities,
        sink: &mut log,
    };

    let summary = EncounterResolver::new(&registry)
        .run(&mut player, &mut io)
        .unwrap();

    assert_eq!(summary.outcome, SessionOutcome::Victory);
    assert_eq!(gate.exchanges, 2);
    let player_turns = log.attacks().filter(|a| a.attacker == "Herói").count();
    assert_eq!(player_turns, 2);
    assert!(log.attacks().filter(|a| a.attacker == "Goblin").all(|a| a.damage == 0));

    assert_eq!(player.level(), 2);
    assert_eq!(player.stats().max_health(), 520);
    assert_eq!(player.stats().health(), 520);
    assert_eq!(player.stats().attack(), 15);
}

/// The classic roster (Goblin 1, Orc 3, Troll 2) is climbed in level order.
#[test]
fn test_classic_roster_climbs_in_level_order() {
    let mut config = GameConfig::default();
    config.player.max_health = 100_000;
    let mut game = Game::from_config(&config).unwrap();
    assert_eq!(game.registry.levels(), vec![1, 2, 3]);

    let mut rolls = ScriptedRolls::constant(Roll::MAX);
    let mut chooser = GreedyChooser::new(1);
    let mut log = EventLog::new();
    let mut io = SessionIo {
        rolls: &mut rolls,
        gate: &mut AutoAdvance,
        chooser: &mut chooser,
        sink: &mut log,
    };
    let summary = game.play(&mut io).unwrap();

    assert!(summary.is_victory());
    assert_eq!(log.entered_tiers(), vec![1, 2, 3]);
    assert_eq!(summary.player.level(), 4);
    // One unlock per cleared tier
    assert_eq!(summary.abilities.len(), 4);
    assert_eq!(
        log.count(|e| matches!(e, GameEvent::AbilityUnlocked { .. })),
        3
    );
    // Every tier the player entered was at or below their level
    assert_eq!(log.count(|e| matches!(e, GameEvent::TierDangerous { .. })), 0);
}

/// A tier with several adversaries is fought in insertion order.
#[test]
fn test_tier_fought_in_insertion_order() {
    let config = GameConfig {
        roster: vec![
            RosterEntry::new("Rat", 1),
            RosterEntry::new("Bat", 1),
            RosterEntry::new("Wolf", 1),
        ],
        ..GameConfig::default()
    };
    let mut game = Game::from_config(&config).unwrap();

    let mut rolls = ScriptedRolls::constant(Roll::MAX);
    let mut log = EventLog::new();
    let mut io = SessionIo {
        rolls: &mut rolls,
        gate: &mut AutoAdvance,
        chooser: &mut SkipAbilities,
        sink: &mut log,
    };
    let summary = game.play(&mut io).unwrap();

    let duels: Vec<_> = log
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::DuelStarted { adversary, .. } => Some(adversary.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(duels, vec!["Rat", "Bat", "Wolf"]);
    assert_eq!(summary.adversaries_defeated, 3);
    // A single level-up after the whole tier
    assert_eq!(summary.player.level(), 2);
}

/// Death mid-tier ends the session without a level-up or unlock round.
#[test]
fn test_death_is_terminal() {
    let mut registry = AdversaryRegistry::new();
    registry.insert(Adversary::new("Ogre", 5));
    registry.insert(Adversary::new("Imp", 6));

    let mut player = Player::new(Combatant::new("Herói", 1, 50, 10), AbilityGraph::standard());
    let mut rolls = ScriptedRolls::constant(Roll::MAX);
    let mut log = EventLog::new();
    let mut io = SessionIo {
        rolls: &mut rolls,
        gate: &mut AutoAdvance,
        chooser: &mut GreedyChooser::new(5),
        sink: &mut log,
    };
    let summary = EncounterResolver::new(&registry)
        .run(&mut player, &mut io)
        .unwrap();

    assert_eq!(
        summary.outcome,
        SessionOutcome::Defeat {
            tier_level: 5,
            slain_by: "Ogre".into()
        }
    );
    assert!(!player.is_alive());
    assert_eq!(player.level(), 1);
    assert_eq!(player.abilities().unlocked_count(), 1);
    assert_eq!(log.count(|e| matches!(e, GameEvent::Victory { .. })), 0);
}

/// Seeded sessions replay identically.
#[test]
fn test_seeded_sessions_are_reproducible() {
    let run = |seed: u64| {
        let mut game = Game::from_config(&GameConfig::default()).unwrap();
        let mut rolls = RngRoller::seeded(seed);
        let mut log = EventLog::new();
        let mut io = SessionIo {
            rolls: &mut rolls,
            gate: &mut AutoAdvance,
            chooser: &mut SkipAbilities,
            sink: &mut log,
        };
        let summary = game.play(&mut io).unwrap();
        (summary.outcome, summary.exchanges, log.events.len())
    };

    assert_eq!(run(1234), run(1234));
}

/// The shipped config file parses to the built-in defaults.
#[test]
fn test_shipped_config_matches_defaults() {
    let shipped = GameConfig::load(std::path::Path::new("data/game.toml")).unwrap();
    let defaults = GameConfig::default();
    assert_eq!(shipped.player.max_health, defaults.player.max_health);
    assert_eq!(shipped.roster, defaults.roster);
    assert_eq!(shipped.abilities.nodes, defaults.abilities.nodes);
    assert_eq!(shipped.adversaries, defaults.adversaries);
}

/// A summary serializes for the `--format json` output.
#[test]
fn test_summary_serializes() {
    let mut game = Game::from_config(&GameConfig::default()).unwrap();
    // Hero always misses, the goblin always crits
    let script = [1u8, 20].repeat(10);
    let mut rolls = ScriptedRolls::from_values(&script).unwrap();
    let mut io = SessionIo {
        rolls: &mut rolls,
        gate: &mut AutoAdvance,
        chooser: &mut SkipAbilities,
        sink: &mut NullSink,
    };
    let summary = game.play(&mut io).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["player"]["name"], "Herói");
    assert!(json["outcome"]["Defeat"]["slain_by"].is_string());
}
