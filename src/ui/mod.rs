//! UI module - text console front end

pub mod console;

pub use console::{render, ConsoleSink, EnterGate, LineSource, PromptChooser, StdinLines};
