pub mod api;
pub mod classifier;
pub mod equation;
pub mod equivalence;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod hints;
pub mod options;
pub mod problem_type;
pub mod rng;
pub mod session;
pub mod step_validation;
pub mod suggestion;
pub mod types;

pub use api::StepTutor;
pub use classifier::classify_error;
pub use equation::{extract_equation, split_equation, EquationSides};
pub use equivalence::{are_equivalent, find_counterexample, is_valid_equation, CounterExample};
pub use error::{EngineError, EquationError};
pub use evaluator::{eval_f64, EvalError, EvalOptions};
pub use expression::Expression;
pub use hints::{is_likely_solution, HintSelector};
pub use options::ValidatorOptions;
pub use problem_type::ProblemType;
pub use rng::{FixedHintRng, HintRng, SeededHintRng};
pub use session::{
    initial_feedback, is_step_complete, Difficulty, MathProblem, SolutionState, SolutionStats,
    SolutionStep, StepDelta, StepFeedback, StepReview,
};
pub use step_validation::{
    check_preservation, is_balanced, residuals_proportional, validate_step, Preservation,
};
pub use suggestion::suggest_next_step;
pub use types::{ErrorType, StepValidation};

pub use tutor_parser::{normalize, ParseError};
