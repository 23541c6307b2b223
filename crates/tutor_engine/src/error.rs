use thiserror::Error;
use tutor_parser::ParseError;

/// Why an equation string could not be split into two sides.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquationError {
    #[error("no equation of the form 'left = right' found")]
    NotFound,
    #[error("expected exactly one '=', found {0}")]
    EqualsCount(usize),
    #[error("cannot parse {side} side: {source}")]
    Side {
        side: &'static str,
        #[source]
        source: ParseError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
