use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty expression")]
    Empty,
    #[error("Parse error: {0}")]
    NomError(String),
    #[error("Unconsumed input: {0}")]
    UnconsumedInput(String),
    #[error("Expression too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },
    #[error("Parentheses nested too deeply: {depth} (max {max})")]
    TooDeep { depth: usize, max: usize },
    #[error("Unbalanced parentheses")]
    UnbalancedParens,
}
