use std::fmt;
use std::rc::Rc;

use tutor_ast::{contains_variable, Expr};
use tutor_parser::{normalize, parse, ParseError};

use crate::evaluator::{eval_f64, EvalError};
use crate::options::ValidatorOptions;

/// A parsed expression together with the normalized text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    text: String,
    root: Rc<Expr>,
}

impl Expression {
    /// Normalize `raw` and parse it.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let text = normalize(raw);
        let root = parse(&text)?;
        Ok(Self { text, root })
    }

    /// Normalized source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &Rc<Expr> {
        &self.root
    }

    pub fn mentions(&self, variable: &str) -> bool {
        contains_variable(&self.root, variable)
    }

    pub fn eval_at(&self, value: f64, opts: &ValidatorOptions) -> Result<f64, EvalError> {
        eval_f64(&self.root, &opts.variable, value, &opts.eval)
    }

    /// Evaluate a side that is expected not to mention the variable.
    pub fn eval_constant(&self, opts: &ValidatorOptions) -> Result<f64, EvalError> {
        self.eval_at(0.0, opts)
    }

    /// Case- and whitespace-insensitive textual identity.
    pub fn same_text(&self, other: &Expression) -> bool {
        self.text.to_lowercase() == other.text.to_lowercase()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
