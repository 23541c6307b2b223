//! JSON output types for `--format json`.
//!
//! Every document carries `schema_version` and `ok` so scripts can check
//! them before reading the rest.

use serde::Serialize;

use tutor_engine::{ErrorType, ProblemType, SolutionStats};

pub const SCHEMA_VERSION: u32 = 1;

/// Verdict for `check`
#[derive(Serialize, Debug)]
pub struct CheckJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub previous: String,
    pub current: String,
    pub valid: bool,
    pub error_type: Option<ErrorType>,
    pub message: String,
    pub problem_type: ProblemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Result of `validate`
#[derive(Serialize, Debug)]
pub struct ValidateJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub equation: String,
    pub normalized: String,
    pub valid: bool,
}

/// Result of `classify`
#[derive(Serialize, Debug)]
pub struct ClassifyJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub problem: String,
    pub problem_type: ProblemType,
}

/// Result of `hint` and `stuck`
#[derive(Serialize, Debug)]
pub struct HintJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub problem_type: ProblemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    pub hint: String,
}

/// Result of `suggest`
#[derive(Serialize, Debug)]
pub struct SuggestJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub work: String,
    pub suggestion: Option<String>,
}

/// One line of a `replay` transcript
#[derive(Serialize, Debug)]
pub struct ReplayStepJson {
    /// 1-based line number in the input file
    pub line: usize,
    pub work: String,
    /// `false` for work still being written; it is not judged
    pub judged: bool,
    pub valid: bool,
    pub error_type: Option<ErrorType>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Result of `replay`
#[derive(Serialize, Debug)]
pub struct ReplayJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub problem: String,
    pub problem_type: ProblemType,
    pub steps: Vec<ReplayStepJson>,
    pub complete: bool,
    pub stats: SolutionStats,
}

/// An error result
#[derive(Serialize, Debug)]
pub struct ErrorJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub error: String,
}

impl ErrorJsonOutput {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ok: false,
            error: error.into(),
        }
    }
}
