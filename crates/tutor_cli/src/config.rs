use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

use tutor_engine::ValidatorOptions;

pub const DEFAULT_CONFIG_PATH: &str = "tutor_config.toml";

/// Settings read from `tutor_config.toml`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// The unknown students solve for
    pub variable: String,
    /// Absolute tolerance for numeric comparisons
    pub tolerance: f64,
    /// Sample points for expression equivalence
    pub expression_probes: Vec<f64>,
    /// Sample points for solution preservation
    pub solution_probes: Vec<f64>,
    /// Fixed seed for hint phrasing; random when absent
    pub hint_seed: Option<u64>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        let options = ValidatorOptions::default();
        Self {
            variable: options.variable,
            tolerance: options.tolerance,
            expression_probes: options.expression_probes,
            solution_probes: options.solution_probes,
            hint_seed: None,
        }
    }
}

impl TutorConfig {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        "Error parsing config file: {}. Using defaults.",
                        e
                    ),
                },
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    "Error reading config file: {}. Using defaults.",
                    e
                ),
            }
        }
        Self::default()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let mut file = fs::File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Overwrite `path` with the defaults.
    pub fn restore(path: &Path) -> std::io::Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn to_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            variable: self.variable.clone(),
            tolerance: self.tolerance,
            expression_probes: self.expression_probes.clone(),
            solution_probes: self.solution_probes.clone(),
            ..ValidatorOptions::default()
        }
    }
}
