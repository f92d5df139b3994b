//! Console front end: renders events to a terminal and reads player input

use std::io::{self, BufRead, Write};

use crossterm::style::{StyledContent, Stylize};

use crate::core::error::Result;
use crate::core::types::Side;
use crate::encounter::{AbilityChooser, EventSink, GameEvent, TurnGate};
use crate::skills::{AbilityStatus, UnlockRejection};

const SEPARATOR: &str = "=======================";

/// Words that end the ability prompt
const EXIT_WORDS: &[&str] = &["sair", "quit", "q", "done"];

/// Somewhere to read player input from, one line at a time
pub trait LineSource {
    /// `None` on end of input
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads lines from the process's stdin without holding its lock
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf)),
        }
    }
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        match self.read_line(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf)),
        }
    }
}

/// Turn gate that waits for ENTER
pub struct EnterGate<L: LineSource, W: Write> {
    input: L,
    output: W,
}

impl<L: LineSource, W: Write> EnterGate<L, W> {
    pub fn new(input: L, output: W) -> Self {
        Self { input, output }
    }
}

impl<L: LineSource, W: Write> TurnGate for EnterGate<L, W> {
    fn advance(&mut self) -> Result<()> {
        write!(self.output, "Press ENTER to attack...")?;
        self.output.flush()?;
        // End of input lets the fight run on by itself
        self.input.next_line()?;
        Ok(())
    }
}

/// Ability chooser that reads names typed by the player
pub struct PromptChooser<L: LineSource, W: Write> {
    input: L,
    output: W,
}

impl<L: LineSource, W: Write> PromptChooser<L, W> {
    pub fn new(input: L, output: W) -> Self {
        Self { input, output }
    }
}

impl<L: LineSource, W: Write> AbilityChooser for PromptChooser<L, W> {
    fn choose(&mut self, _statuses: &[AbilityStatus]) -> Result<Option<String>> {
        write!(
            self.output,
            "Type the ability to unlock (or 'sair' to continue): "
        )?;
        self.output.flush()?;

        let Some(line) = self.input.next_line()? else {
            return Ok(None);
        };
        let choice = line.trim();
        if choice.is_empty() || EXIT_WORDS.iter().any(|w| choice.eq_ignore_ascii_case(w)) {
            return Ok(None);
        }
        Ok(Some(choice.to_string()))
    }
}

/// Renders events as text, optionally coloured
pub struct ConsoleSink<W: Write> {
    output: W,
    color: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            color: true,
        }
    }

    /// No terminal escape codes
    pub fn plain(output: W) -> Self {
        Self {
            output,
            color: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    fn paint<'a>(&self, text: &'a str, style: fn(&'a str) -> StyledContent<&'a str>) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_event(&mut self, event: &GameEvent) -> io::Result<()> {
        let lines = match event {
            GameEvent::Attack(report) => {
                let rule = match report.attacker_side {
                    Side::Player => self.paint(SEPARATOR, |s| s.blue()),
                    Side::Adversary => self.paint(SEPARATOR, |s| s.red()),
                };
                let mut lines = render(event);
                lines.insert(0, rule);
                lines
            }
            GameEvent::TierDangerous { .. } | GameEvent::PlayerDefeated { .. } => render(event)
                .into_iter()
                .map(|l| self.paint(&l, |s| s.yellow()))
                .collect(),
            GameEvent::Victory { .. } | GameEvent::LevelUp { .. } => render(event)
                .into_iter()
                .map(|l| self.paint(&l, |s| s.green()))
                .collect(),
            _ => render(event),
        };
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &GameEvent) {
        if let Err(e) = self.write_event(event) {
            tracing::warn!("Failed to write event to console: {}", e);
        }
    }
}

/// Human-readable lines for an event
pub fn render(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::TierEntered { level, adversaries } => vec![
            String::new(),
            format!("--- Tier {}: {} ---", level, adversaries.join(", ")),
        ],
        GameEvent::TierDangerous {
            tier_level,
            player_level,
            factor,
        } => vec![format!(
            "Warning: tier {} is {:.1}x your level ({}). Fight carefully.",
            tier_level, factor, player_level
        )],
        GameEvent::TierCleared { level } => vec![format!("Tier {} cleared!", level)],
        GameEvent::DuelStarted {
            adversary,
            level,
            health,
        } => vec![format!(
            "Adversary found: {} (level {}, {} HP)",
            adversary, level, health
        )],
        GameEvent::Attack(report) => {
            let outcome = match report.damage {
                0 => format!("{}, no damage.", report.tier.label()),
                d => format!("{}! Damage: {}", report.tier.label(), d),
            };
            vec![
                format!("{} rolled a d20 and got: {}", report.attacker, report.roll),
                outcome,
                format!("{} HP: {}", report.defender, report.defender_health),
            ]
        }
        GameEvent::AdversaryDefeated { name } => vec![format!("{} was defeated!", name)],
        GameEvent::PlayerDefeated { slain_by } => {
            vec![format!("You were slain by {}. Game over.", slain_by)]
        }
        GameEvent::LevelUp {
            level,
            max_health,
            attack,
        } => vec![format!(
            "Level up! Now level {} ({} HP, {} attack)",
            level, max_health, attack
        )],
        GameEvent::AbilityTree { statuses } => {
            let mut lines = vec![String::new(), "Ability tree:".to_string()];
            lines.extend(statuses.iter().map(render_status));
            lines
        }
        GameEvent::AbilityUnlocked { name } => vec![format!("Learned ability: {}", name)],
        GameEvent::UnlockRejected(rejection) => vec![render_rejection(rejection)],
        GameEvent::Victory { level } => vec![format!(
            "No adversaries left for your level. You won the game at level {}!",
            level
        )],
    }
}

fn render_status(status: &AbilityStatus) -> String {
    let mark = if status.unlocked { "[x]" } else { "[ ]" };
    let prereqs = if status.prerequisites.is_empty() {
        "none".to_string()
    } else {
        status.prerequisites.join(", ")
    };
    let gate = if status.available { "OK" } else { "Blocked" };
    format!(" - {} {} (requires: {}) [{}]", mark, status.name, prereqs, gate)
}

fn render_rejection(rejection: &UnlockRejection) -> String {
    match rejection {
        UnlockRejection::Unknown(_) => "Invalid ability. Try again.".to_string(),
        UnlockRejection::AlreadyUnlocked(_) => "You already learned that ability.".to_string(),
        UnlockRejection::PrerequisitesUnmet { missing, .. } => format!(
            "Prerequisites not met for that ability (missing: {}).",
            missing.join(", ")
        ),
    }
}
