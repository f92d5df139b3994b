//! d20 Ladder - Entry Point
//!
//! Loads the configuration, builds the adversary registry and runs one
//! session in the terminal.

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use d20_ladder::combat::RngRoller;
use d20_ladder::core::config::GameConfig;
use d20_ladder::core::error::Result;
use d20_ladder::encounter::{
    AbilityChooser, AutoAdvance, SessionIo, SessionOutcome, SkipAbilities, TurnGate,
};
use d20_ladder::game::Game;
use d20_ladder::ui::{ConsoleSink, EnterGate, PromptChooser, StdinLines};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Turn-based d20 combat up a ladder of adversaries
#[derive(Parser, Debug)]
#[command(name = "d20-ladder")]
#[command(about = "Fight your way up a ladder of adversaries with a d20")]
struct Args {
    /// Game config (TOML). Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Hero name (overrides the config)
    #[arg(long)]
    name: Option<String>,

    /// Don't wait for ENTER and skip ability prompts
    #[arg(long)]
    auto: bool,

    /// Print the end-of-session summary as text or JSON
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("d20_ladder=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(name) = args.name {
        config.player.name = name;
    }

    let seed = args
        .seed
        .or(config.session.seed)
        .unwrap_or_else(|| rand::random());
    tracing::info!("d20 Ladder starting (seed {})", seed);

    let mut game = Game::from_config(&config)?;

    println!("=== d20 Ladder: adversary registry, ability tree and a d20 ===");
    println!();

    let mut rolls = RngRoller::seeded(seed);
    let mut sink = ConsoleSink::new(io::stdout());
    let (mut gate, mut chooser): (Box<dyn TurnGate>, Box<dyn AbilityChooser>) = if args.auto {
        (Box::new(AutoAdvance), Box::new(SkipAbilities))
    } else {
        (
            Box::new(EnterGate::new(StdinLines, io::stdout())),
            Box::new(PromptChooser::new(StdinLines, io::stdout())),
        )
    };

    let mut session = SessionIo {
        rolls: &mut rolls,
        gate: gate.as_mut(),
        chooser: chooser.as_mut(),
        sink: &mut sink,
    };
    let summary = game.play(&mut session)?;

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        Format::Text => {
            println!();
            match &summary.outcome {
                SessionOutcome::Victory => println!("Victory!"),
                SessionOutcome::Defeat {
                    tier_level,
                    slain_by,
                } => println!("Defeated by {} in tier {}.", slain_by, tier_level),
            }
            println!(
                "{}: level {}, {}/{} HP, {} attack",
                summary.player.name(),
                summary.player.level(),
                summary.player.health(),
                summary.player.max_health(),
                summary.player.attack()
            );
            println!(
                "Tiers cleared: {:?} | Adversaries defeated: {} | Exchanges: {}",
                summary.tiers_cleared, summary.adversaries_defeated, summary.exchanges
            );
            println!("Abilities: {}", summary.abilities.join(", "));
        }
    }

    Ok(())
}
