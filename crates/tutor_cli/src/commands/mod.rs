//! Subcommand handlers.

pub mod check;
pub mod classify;
pub mod config_cmd;
pub mod hint;
pub mod replay;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use tutor_engine::StepTutor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What every handler needs: the configured tutor and the output format.
pub struct CommandContext {
    pub tutor: StepTutor,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
