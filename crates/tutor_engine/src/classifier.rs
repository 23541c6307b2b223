//! Shallow heuristics that name the kind of mistake in a step.

use crate::equation::EquationSides;
use crate::equivalence::are_equivalent;
use crate::expression::Expression;
use crate::options::ValidatorOptions;
use crate::types::ErrorType;

/// Classify the transition `previous → current`. First match wins:
/// sign error, then calculation error; `None` when neither fires.
pub fn classify_error(
    previous: &EquationSides,
    current: &EquationSides,
    opts: &ValidatorOptions,
) -> Option<ErrorType> {
    if has_sign_error(previous, current, opts) {
        return Some(ErrorType::SignError);
    }
    if has_calculation_error(previous, current, opts) {
        return Some(ErrorType::CalculationError);
    }
    None
}

/// Only one side was rewritten, and the rewrite is not equivalent.
/// Usually an operation applied to a single side.
fn has_sign_error(previous: &EquationSides, current: &EquationSides, opts: &ValidatorOptions) -> bool {
    let left_same = previous.left.same_text(&current.left);
    let right_same = previous.right.same_text(&current.right);

    match (left_same, right_same) {
        (true, false) => !are_equivalent(&previous.right, &current.right, opts),
        (false, true) => !are_equivalent(&previous.left, &current.left, opts),
        _ => false,
    }
}

/// A side that is plain arithmetic in both steps changed value.
fn has_calculation_error(
    previous: &EquationSides,
    current: &EquationSides,
    opts: &ValidatorOptions,
) -> bool {
    constant_changed(&previous.left, &current.left, opts)
        || constant_changed(&previous.right, &current.right, opts)
}

fn constant_changed(before: &Expression, after: &Expression, opts: &ValidatorOptions) -> bool {
    if before.mentions(&opts.variable) || after.mentions(&opts.variable) {
        return false;
    }
    // Unevaluable sides cannot be verified either way
    match (before.eval_constant(opts), after.eval_constant(opts)) {
        (Ok(a), Ok(b)) => !opts.close(a, b),
        _ => false,
    }
}
