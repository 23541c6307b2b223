use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use tutor_parser::normalize;

use crate::error::EngineError;
use crate::types::canonical_variant;

/// Family of problem, used to pick context-specific hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemType {
    Linear,
    Quadratic,
    Rational,
    Radical,
    Trigonometric,
    Logarithmic,
    Arithmetic,
    System,
    Inequality,
}

static RE_SQUARED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\^2|²").expect("valid regex literal"));
static RE_RADICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sqrt|√|∛|∜").expect("valid regex literal"));
static RE_TRIG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sin|cos|tan").expect("valid regex literal"));
static RE_LOG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"log|ln").expect("valid regex literal"));
static RE_INEQUALITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>≤≥]").expect("valid regex literal"));
static RE_LINEAR_X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d*x\b").expect("valid regex literal"));

/// `variable` as a standalone term, optionally after a coefficient, so
/// that `max` or `exp` do not count as mentioning `x`.
fn has_variable_term(text: &str, variable: &str) -> bool {
    let variable = variable.to_lowercase();
    if variable == "x" {
        return RE_LINEAR_X.is_match(text);
    }
    match Regex::new(&format!(r"\b\d*{}\b", regex::escape(&variable))) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

impl ProblemType {
    pub const ALL: [ProblemType; 9] = [
        ProblemType::Linear,
        ProblemType::Quadratic,
        ProblemType::Rational,
        ProblemType::Radical,
        ProblemType::Trigonometric,
        ProblemType::Logarithmic,
        ProblemType::Arithmetic,
        ProblemType::System,
        ProblemType::Inequality,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProblemType::Linear => "LINEAR",
            ProblemType::Quadratic => "QUADRATIC",
            ProblemType::Rational => "RATIONAL",
            ProblemType::Radical => "RADICAL",
            ProblemType::Trigonometric => "TRIGONOMETRIC",
            ProblemType::Logarithmic => "LOGARITHMIC",
            ProblemType::Arithmetic => "ARITHMETIC",
            ProblemType::System => "SYSTEM",
            ProblemType::Inequality => "INEQUALITY",
        }
    }

    /// Detect the problem family from the original problem text.
    ///
    /// Rules are checked in priority order and the first match wins, so
    /// `x^2 = 4/x` is quadratic, not rational.
    pub fn detect(problem: &str, variable: &str) -> ProblemType {
        let text = normalize(problem).to_lowercase();

        if equation_count(&text) > 1 {
            return ProblemType::System;
        }
        if RE_INEQUALITY.is_match(&text) {
            return ProblemType::Inequality;
        }
        if RE_SQUARED.is_match(&text) {
            return ProblemType::Quadratic;
        }
        if RE_RADICAL.is_match(&text) {
            return ProblemType::Radical;
        }
        if text.contains('/') {
            return ProblemType::Rational;
        }
        if RE_TRIG.is_match(&text) {
            return ProblemType::Trigonometric;
        }
        if RE_LOG.is_match(&text) {
            return ProblemType::Logarithmic;
        }
        if !variable.is_empty() && has_variable_term(&text, variable) {
            return ProblemType::Linear;
        }
        ProblemType::Arithmetic
    }
}

/// Number of `=` signs that are not part of `<=` or `>=`.
fn equation_count(text: &str) -> usize {
    text.replace("<=", "<").replace(">=", ">").matches('=').count()
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical_variant(s);
        ProblemType::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| EngineError::UnknownVariant {
                kind: "problem type",
                value: s.to_string(),
            })
    }
}
