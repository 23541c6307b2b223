pub mod expression;
pub mod traversal;

pub use expression::{Constant, Expr};
pub use traversal::contains_variable;
