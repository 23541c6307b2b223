//! Stack-safe traversal for expression trees.
//!
//! Walks use an explicit stack, so they are safe on any tree depth the
//! parser lets through.

use crate::expression::Expr;

/// Whether `name` occurs as a variable anywhere in the tree.
pub fn contains_variable(root: &Expr, name: &str) -> bool {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if matches!(node, Expr::Variable(v) if v == name) {
            return true;
        }
        stack.extend(node.children().into_iter().map(|c| c.as_ref()));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> std::rc::Rc<Expr> {
        // 2 * x + sin(y)
        Expr::add(
            Expr::mul(Expr::num(2.0), Expr::var("x")),
            Expr::func("sin", vec![Expr::var("y")]),
        )
    }

    #[test]
    fn contains_variable_matches_exact_name() {
        let e = sample();
        assert!(contains_variable(&e, "x"));
        assert!(contains_variable(&e, "y"));
        assert!(!contains_variable(&e, "z"));
        assert!(!contains_variable(&Expr::var("xy"), "x"));
        assert!(!contains_variable(&Expr::num(3.0), "x"));
    }
}
