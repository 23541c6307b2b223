//! Numeric equivalence testing.
//!
//! Two expressions are treated as equivalent when they agree at every
//! expression probe. This is sampling, not proof: expressions that differ
//! only away from the probes are reported equivalent.

use crate::equation::EquationSides;
use crate::expression::Expression;
use crate::options::ValidatorOptions;

/// A probe where two expressions disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterExample {
    /// Variable value used; `None` when neither side mentions the variable
    pub at: Option<f64>,
    /// Value of the first expression (`None` if it failed to evaluate)
    pub a_value: Option<f64>,
    /// Value of the second expression (`None` if it failed to evaluate)
    pub b_value: Option<f64>,
}

impl CounterExample {
    pub fn difference(&self) -> Option<f64> {
        match (self.a_value, self.b_value) {
            (Some(a), Some(b)) => Some((a - b).abs()),
            _ => None,
        }
    }
}

/// Compare both sides at a single probe.
///
/// Both within tolerance, or both failing (a shared pole), counts as
/// agreement; a one-sided failure is a disagreement.
fn check_point(
    a: &Expression,
    b: &Expression,
    at: f64,
    opts: &ValidatorOptions,
) -> Option<CounterExample> {
    let a_value = a.eval_at(at, opts).ok();
    let b_value = b.eval_at(at, opts).ok();

    let agree = match (a_value, b_value) {
        (Some(x), Some(y)) => opts.close(x, y),
        (None, None) => true,
        _ => false,
    };
    if agree {
        None
    } else {
        Some(CounterExample {
            at: Some(at),
            a_value,
            b_value,
        })
    }
}

/// Variable-free sides are evaluated once; a side that cannot be evaluated
/// makes the pair a counterexample.
fn check_constants(
    a: &Expression,
    b: &Expression,
    opts: &ValidatorOptions,
) -> Option<CounterExample> {
    let a_value = a.eval_constant(opts).ok();
    let b_value = b.eval_constant(opts).ok();
    match (a_value, b_value) {
        (Some(x), Some(y)) if opts.close(x, y) => None,
        _ => Some(CounterExample {
            at: None,
            a_value,
            b_value,
        }),
    }
}

/// First probe at which `a` and `b` disagree.
pub fn find_counterexample(
    a: &Expression,
    b: &Expression,
    opts: &ValidatorOptions,
) -> Option<CounterExample> {
    if !a.mentions(&opts.variable) && !b.mentions(&opts.variable) {
        return check_constants(a, b, opts);
    }

    opts.expression_probes
        .iter()
        .find_map(|&probe| check_point(a, b, probe, opts))
}

pub fn are_equivalent(a: &Expression, b: &Expression, opts: &ValidatorOptions) -> bool {
    match find_counterexample(a, b, opts) {
        None => true,
        Some(ce) => {
            tracing::trace!(a = %a, b = %b, at = ?ce.at, a_value = ?ce.a_value, b_value = ?ce.b_value, "not equivalent");
            false
        }
    }
}

/// Whether the sides of `equation` are equivalent expressions.
///
/// Fails closed: text with no equation, several `=` or an unparsable side
/// is not a valid equation.
pub fn is_valid_equation(equation: &str, opts: &ValidatorOptions) -> bool {
    match EquationSides::from_step(equation) {
        Ok(sides) => are_equivalent(&sides.left, &sides.right, opts),
        Err(e) => {
            tracing::trace!(equation, error = %e, "not an equation");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(s: &str) -> Expression {
        Expression::parse(s).unwrap()
    }

    fn equiv(a: &str, b: &str) -> bool {
        are_equivalent(&expr(a), &expr(b), &ValidatorOptions::default())
    }

    #[test]
    fn equivalent_rewrites() {
        assert!(equiv("2(x+1)", "2x+2"));
        assert!(equiv("(x+1)^2", "x^2+2x+1"));
        assert!(equiv("x+x", "2x"));
        assert!(equiv("3*4", "12"));
    }

    #[test]
    fn non_equivalent_rewrites() {
        assert!(!equiv("2(x+1)", "2x+1"));
        assert!(!equiv("x^2", "2x"));
        assert!(!equiv("7", "10"));
    }

    #[test]
    fn one_sided_failure_is_a_mismatch() {
        // 1/x fails at 0 while x does not
        assert!(!equiv("x/x", "1"));
        let ce = find_counterexample(&expr("x/x"), &expr("1"), &ValidatorOptions::default())
            .unwrap();
        assert_eq!(ce.at, Some(0.0));
        assert_eq!(ce.a_value, None);
        assert_eq!(ce.difference(), None);
    }

    #[test]
    fn shared_pole_counts_as_agreement() {
        assert!(equiv("1/x", "2/(2x)"));
    }

    #[test]
    fn undefined_constants_are_never_equivalent() {
        assert!(!equiv("1/0", "2/0"));
        assert!(!equiv("1/0", "1/0"));
        assert!(!equiv("sqrt(-1)", "log(0)"));
        let ce = find_counterexample(&expr("1/0"), &expr("3"), &ValidatorOptions::default())
            .unwrap();
        assert_eq!(ce.at, None);
        assert_eq!(ce.a_value, None);
        assert_eq!(ce.b_value, Some(3.0));
    }

    #[test]
    fn counterexample_reports_values() {
        let ce = find_counterexample(&expr("x+1"), &expr("x+2"), &ValidatorOptions::default())
            .unwrap();
        assert_eq!(ce.at, Some(0.0));
        assert_eq!(ce.a_value, Some(1.0));
        assert_eq!(ce.b_value, Some(2.0));
        assert_eq!(ce.difference(), Some(1.0));
    }

    #[test]
    fn valid_equation_checks() {
        let opts = ValidatorOptions::default();
        assert!(is_valid_equation("2 + 3 = 5", &opts));
        assert!(is_valid_equation("2(x+1) = 2x + 2", &opts));
        assert!(!is_valid_equation("2 + 3 = 6", &opts));
        assert!(!is_valid_equation("2x + 3 = 7", &opts));
        assert!(!is_valid_equation("no equation", &opts));
        assert!(!is_valid_equation("x = ", &opts));
        assert!(!is_valid_equation("1/0 = 2/0", &opts));
        assert!(!is_valid_equation("sqrt(-1) = log(0)", &opts));
    }
}
