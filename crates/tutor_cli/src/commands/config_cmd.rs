use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::TutorConfig;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Overwrite the config file with the defaults
    Restore,
}

pub fn run(command: ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = TutorConfig::load(path);
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::Restore => {
            TutorConfig::restore(path)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Restored default configuration to {}", path.display());
        }
    }
    Ok(())
}
