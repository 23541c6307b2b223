use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Kind of mistake attached to a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    SignError,
    CalculationError,
    AlgebraicMistake,
    WrongApproach,
    IncompleteStep,
}

impl ErrorType {
    pub const ALL: [ErrorType; 5] = [
        ErrorType::SignError,
        ErrorType::CalculationError,
        ErrorType::AlgebraicMistake,
        ErrorType::WrongApproach,
        ErrorType::IncompleteStep,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::SignError => "SIGN_ERROR",
            ErrorType::CalculationError => "CALCULATION_ERROR",
            ErrorType::AlgebraicMistake => "ALGEBRAIC_MISTAKE",
            ErrorType::WrongApproach => "WRONG_APPROACH",
            ErrorType::IncompleteStep => "INCOMPLETE_STEP",
        }
    }

    /// Short verdict message shown with a failed validation.
    pub fn message(self) -> &'static str {
        match self {
            ErrorType::SignError => "Check your signs - did you apply the operation to both sides?",
            ErrorType::CalculationError => "Double-check your arithmetic",
            ErrorType::AlgebraicMistake => {
                "This algebraic step doesn't follow from the previous one"
            }
            ErrorType::WrongApproach => "This approach may not lead to the solution",
            ErrorType::IncompleteStep => "This step is incomplete or unclear",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical spelling used by the `FromStr` impls: `sign-error` → `SIGN_ERROR`.
pub(crate) fn canonical_variant(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace(['-', ' '], "_")
}

impl FromStr for ErrorType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical_variant(s);
        ErrorType::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| EngineError::UnknownVariant {
                kind: "error type",
                value: s.to_string(),
            })
    }
}

/// Verdict for one (previous, current) step pair.
///
/// `error_type` is `None` exactly when the step is valid; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepValidation {
    is_valid: bool,
    error_type: Option<ErrorType>,
    message: String,
}

impl StepValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_type: None,
            message: "Step is correct".to_string(),
        }
    }

    pub fn invalid(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_type: Some(error_type),
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
