//! Numeric evaluation of expressions using f64 values.
//!
//! Used by the equivalence tester: a failed evaluation means "not comparable
//! at this sample point", never a crash.

use thiserror::Error;
use tutor_ast::Expr;

/// Why an expression could not be evaluated at a point.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Division by exactly zero
    #[error("division by zero in {op}")]
    DivisionByZero { op: &'static str },
    /// Denominator too close to zero (likely a pole)
    #[error("near pole in {op}: denominator {denom:e} within {threshold:e}")]
    NearPole {
        op: &'static str,
        denom: f64,
        threshold: f64,
    },
    /// Argument outside the real domain (log of non-positive, sqrt of negative)
    #[error("{function} undefined at {arg}")]
    Domain { function: String, arg: f64 },
    /// Result is NaN or infinite
    #[error("result is not finite")]
    NonFinite,
    /// Symbol other than the declared variable
    #[error("unbound symbol '{name}'")]
    UnboundVariable { name: String },
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },
    #[error("{function} expects {expected} argument(s), found {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },
    /// Depth limit exceeded
    #[error("expression nested too deeply")]
    DepthExceeded,
}

/// Options for checked evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalOptions {
    /// Absolute epsilon for near-zero denominators and trig poles
    pub zero_eps: f64,
    /// Maximum recursion depth
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            zero_eps: 1e-12,
            max_depth: 200,
        }
    }
}

/// Functions the grammar knows, all of arity one.
pub const KNOWN_FUNCTIONS: [&str; 9] = [
    "sin", "cos", "tan", "sinh", "cosh", "tanh", "log", "ln", "sqrt",
];

/// Evaluate `expr` with `variable` bound to `value`.
pub fn eval_f64(
    expr: &Expr,
    variable: &str,
    value: f64,
    opts: &EvalOptions,
) -> Result<f64, EvalError> {
    eval_depth(expr, variable, value, opts, opts.max_depth)
}

fn eval_depth(
    expr: &Expr,
    variable: &str,
    value: f64,
    opts: &EvalOptions,
    depth: usize,
) -> Result<f64, EvalError> {
    if depth == 0 {
        return Err(EvalError::DepthExceeded);
    }
    let eval = |e: &Expr| eval_depth(e, variable, value, opts, depth - 1);

    let result = match expr {
        Expr::Number(n) => *n,
        Expr::Constant(c) => c.value(),
        Expr::Variable(name) => {
            if name != variable {
                return Err(EvalError::UnboundVariable { name: name.clone() });
            }
            value
        }
        Expr::Add(l, r) => eval(l)? + eval(r)?,
        Expr::Sub(l, r) => eval(l)? - eval(r)?,
        Expr::Mul(l, r) => eval(l)? * eval(r)?,
        Expr::Div(l, r) => {
            // Denominator first so a pole is reported as such
            let b = eval(r)?;
            if b == 0.0 {
                return Err(EvalError::DivisionByZero { op: "Div" });
            }
            if b.abs() <= opts.zero_eps {
                return Err(EvalError::NearPole {
                    op: "Div",
                    denom: b,
                    threshold: opts.zero_eps,
                });
            }
            eval(l)? / b
        }
        Expr::Pow(b, e) => {
            let base = eval(b)?;
            let exp = eval(e)?;
            // Negative base with a fractional exponent has no real value
            if base < 0.0 && exp.fract() != 0.0 {
                return Err(EvalError::Domain {
                    function: "pow".to_string(),
                    arg: base,
                });
            }
            if base == 0.0 && exp < 0.0 {
                return Err(EvalError::DivisionByZero { op: "Pow" });
            }
            base.powf(exp)
        }
        Expr::Neg(e) => -eval(e)?,
        Expr::Function(name, args) => {
            if args.len() != 1 {
                if !KNOWN_FUNCTIONS.contains(&name.as_str()) {
                    return Err(EvalError::UnknownFunction { name: name.clone() });
                }
                return Err(EvalError::Arity {
                    function: name.clone(),
                    expected: 1,
                    found: args.len(),
                });
            }
            let arg = eval(&args[0])?;
            eval_function(name, arg, opts)?
        }
    };

    if !result.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(result)
}

#[inline(never)]
fn eval_function(name: &str, x: f64, opts: &EvalOptions) -> Result<f64, EvalError> {
    let domain = |function: &str| EvalError::Domain {
        function: function.to_string(),
        arg: x,
    };

    match name {
        "sin" => Ok(x.sin()),
        "cos" => Ok(x.cos()),
        "tan" => {
            let cos_x = x.cos();
            if cos_x.abs() <= opts.zero_eps {
                return Err(EvalError::NearPole {
                    op: "Tan",
                    denom: cos_x,
                    threshold: opts.zero_eps,
                });
            }
            Ok(x.tan())
        }
        "sinh" => Ok(x.sinh()),
        "cosh" => Ok(x.cosh()),
        "tanh" => Ok(x.tanh()),
        "log" => {
            if x <= 0.0 {
                return Err(domain("log"));
            }
            Ok(x.log10())
        }
        "ln" => {
            if x <= 0.0 {
                return Err(domain("ln"));
            }
            Ok(x.ln())
        }
        "sqrt" => {
            if x < 0.0 {
                return Err(domain("sqrt"));
            }
            Ok(x.sqrt())
        }
        _ => Err(EvalError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_parser::{normalize, parse};

    fn eval_at(input: &str, x: f64) -> Result<f64, EvalError> {
        let expr = parse(&normalize(input)).expect("parse failed");
        eval_f64(&expr, "x", x, &EvalOptions::default())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn evaluates_arithmetic_with_precedence() {
        assert_close(eval_at("2 + 3 * 4", 0.0).unwrap(), 14.0);
        assert_close(eval_at("(2 + 3) * 4", 0.0).unwrap(), 20.0);
        assert_close(eval_at("2x + 3", 2.0).unwrap(), 7.0);
    }

    #[test]
    fn unary_minus_is_applied_after_power() {
        assert_close(eval_at("-2^2", 0.0).unwrap(), -4.0);
        assert_close(eval_at("(-2)^2", 0.0).unwrap(), 4.0);
        assert_close(eval_at("-x^2", 3.0).unwrap(), -9.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_close(eval_at("2^3^2", 0.0).unwrap(), 512.0);
        assert_close(eval_at("2^-1", 0.0).unwrap(), 0.5);
    }

    #[test]
    fn log_is_base_ten_and_ln_is_natural() {
        assert_close(eval_at("log(1000)", 0.0).unwrap(), 3.0);
        assert_close(eval_at("ln(e)", 0.0).unwrap(), 1.0);
    }

    #[test]
    fn trig_uses_radians() {
        assert_close(eval_at("sin(pi/2)", 0.0).unwrap(), 1.0);
        assert_close(eval_at("cos(x)", 0.0).unwrap(), 1.0);
        assert_close(eval_at("tanh(0)", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            eval_at("1/x", 0.0),
            Err(EvalError::DivisionByZero { op: "Div" })
        );
        assert_eq!(
            eval_at("0^-1", 0.0),
            Err(EvalError::DivisionByZero { op: "Pow" })
        );
    }

    #[test]
    fn domain_errors() {
        assert!(matches!(eval_at("sqrt(x)", -1.0), Err(EvalError::Domain { .. })));
        assert!(matches!(eval_at("log(x)", 0.0), Err(EvalError::Domain { .. })));
        assert!(matches!(eval_at("ln(x)", -2.0), Err(EvalError::Domain { .. })));
        assert!(matches!(eval_at("(-8)^(1/3)", 0.0), Err(EvalError::Domain { .. })));
    }

    #[test]
    fn unbound_symbols_and_unknown_functions() {
        assert_eq!(
            eval_at("y + 1", 0.0),
            Err(EvalError::UnboundVariable {
                name: "y".to_string()
            })
        );
        assert_eq!(
            eval_at("foo(x)", 0.0),
            Err(EvalError::UnknownFunction {
                name: "foo".to_string()
            })
        );
        assert!(matches!(eval_at("sin(x, 2)", 0.0), Err(EvalError::Arity { .. })));
    }

    #[test]
    fn overflow_is_non_finite() {
        assert_eq!(eval_at("10^400", 0.0), Err(EvalError::NonFinite));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let opts = EvalOptions {
            max_depth: 3,
            ..EvalOptions::default()
        };
        let expr = parse("1+1+1+1").unwrap();
        assert_eq!(eval_f64(&expr, "x", 0.0, &opts), Err(EvalError::DepthExceeded));
    }
}
