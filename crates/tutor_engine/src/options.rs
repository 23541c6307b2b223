use crate::error::EngineError;
use crate::evaluator::{EvalOptions, KNOWN_FUNCTIONS};

/// Sample points for expression equivalence.
pub const EXPRESSION_PROBES: [f64; 7] = [0.0, 1.0, -1.0, 2.0, -2.0, 0.5, 10.0];

/// Sample points for solution preservation between two equations.
pub const SOLUTION_PROBES: [f64; 6] = [0.0, 1.0, -1.0, 2.0, 5.0, -5.0];

/// Absolute tolerance used by every numeric comparison.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Knobs shared by the equivalence tester, classifier and step validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorOptions {
    /// The single unknown students solve for
    pub variable: String,
    pub tolerance: f64,
    pub expression_probes: Vec<f64>,
    pub solution_probes: Vec<f64>,
    pub eval: EvalOptions,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            variable: "x".to_string(),
            tolerance: DEFAULT_TOLERANCE,
            expression_probes: EXPRESSION_PROBES.to_vec(),
            solution_probes: SOLUTION_PROBES.to_vec(),
            eval: EvalOptions::default(),
        }
    }
}

impl ValidatorOptions {
    /// `true` when `a` and `b` agree within the configured tolerance.
    pub fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.tolerance
    }

    /// Reject settings that would make every comparison meaningless.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut chars = self.variable.chars();
        let well_formed = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        let reserved = matches!(self.variable.as_str(), "e" | "pi")
            || KNOWN_FUNCTIONS.contains(&self.variable.as_str());
        if !well_formed || reserved {
            return Err(EngineError::InvalidOptions(format!(
                "variable '{}' is not an identifier",
                self.variable
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EngineError::InvalidOptions(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.expression_probes.is_empty() || self.solution_probes.is_empty() {
            return Err(EngineError::InvalidOptions("probe sets must not be empty".to_string()));
        }
        if self
            .expression_probes
            .iter()
            .chain(&self.solution_probes)
            .any(|p| !p.is_finite())
        {
            return Err(EngineError::InvalidOptions("probes must be finite".to_string()));
        }
        Ok(())
    }
}
