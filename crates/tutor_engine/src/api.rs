//! `StepTutor`: the entry points a tutoring front end calls.

use tracing::debug;
use tutor_parser::normalize;

use crate::equivalence::is_valid_equation;
use crate::hints::{is_likely_solution, next_step_encouragement, stuck_hint, HintSelector};
use crate::options::ValidatorOptions;
use crate::problem_type::ProblemType;
use crate::rng::{HintRng, SeededHintRng};
use crate::session::{
    is_step_complete, SolutionState, SolutionStep, StepDelta, StepFeedback, StepReview,
    STEP_CONFIDENCE,
};
use crate::step_validation::validate_step;
use crate::suggestion::suggest_next_step;
use crate::types::{ErrorType, StepValidation};

/// Validation, classification and hints behind one value.
///
/// Everything but hint phrasing is a pure function of the inputs; the hint
/// random source is the only state, and the caller owns it.
#[derive(Debug, Clone)]
pub struct StepTutor<R: HintRng = SeededHintRng> {
    options: ValidatorOptions,
    hints: HintSelector<R>,
}

impl StepTutor<SeededHintRng> {
    /// Reproducible hint phrasing.
    pub fn with_seed(options: ValidatorOptions, seed: u64) -> Self {
        Self::new(options, SeededHintRng::from_seed(seed))
    }
}

impl Default for StepTutor<SeededHintRng> {
    fn default() -> Self {
        Self::new(ValidatorOptions::default(), SeededHintRng::from_entropy())
    }
}

impl<R: HintRng> StepTutor<R> {
    pub fn new(options: ValidatorOptions, rng: R) -> Self {
        Self {
            options,
            hints: HintSelector::new(rng),
        }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Whether `text` is an equation whose sides are equivalent.
    pub fn normalize_and_validate_equation(&self, text: &str) -> bool {
        is_valid_equation(&normalize(text), &self.options)
    }

    pub fn validate_step(&self, previous: &str, current: &str) -> StepValidation {
        validate_step(previous, current, &self.options)
    }

    pub fn detect_problem_type(&self, problem: &str) -> ProblemType {
        ProblemType::detect(problem, &self.options.variable)
    }

    pub fn generate_hint(
        &mut self,
        error: Option<ErrorType>,
        problem: ProblemType,
        current_work: &str,
        step_index: usize,
    ) -> String {
        self.hints
            .generate_hint(error, problem, current_work, step_index)
    }

    pub fn suggest_next_step(&self, current_work: &str) -> Option<&'static str> {
        suggest_next_step(current_work, &self.options.variable)
    }

    pub fn generate_stuck_hint(&self, problem: ProblemType, elapsed_ms: u64) -> String {
        stuck_hint(problem, elapsed_ms).to_string()
    }

    /// Judge `work` as the next step of `state`.
    ///
    /// The step is checked against the last correct step, or the problem
    /// equation before any. Work that is still being written gets a
    /// suggestion and an empty delta; nothing is recorded for it.
    pub fn review_step(
        &mut self,
        state: &SolutionState,
        work: &str,
        timestamp_ms: u64,
    ) -> StepReview {
        let step_index = state.current_step;
        let suggestion = self.suggest_next_step(work).map(str::to_string);

        if !is_step_complete(work) {
            return StepReview {
                validation: StepValidation::invalid(
                    ErrorType::IncompleteStep,
                    ErrorType::IncompleteStep.message(),
                ),
                feedback: StepFeedback {
                    is_on_track: true,
                    current_step_valid: false,
                    subtle_hint: None,
                    suggested_next_step: suggestion,
                    confidence: STEP_CONFIDENCE,
                },
                delta: StepDelta::default(),
            };
        }

        let previous = state
            .last_correct_step()
            .map_or(state.problem.equation.as_str(), |s| s.user_work.as_str());
        let validation = self.validate_step(previous, work);
        debug!(
            problem = %state.problem.id,
            step = step_index,
            previous,
            work,
            valid = validation.is_valid(),
            "reviewed step"
        );

        let (feedback, delta) = if validation.is_valid() {
            let encouragement = next_step_encouragement(work, &self.options.variable, step_index);
            let feedback = StepFeedback {
                is_on_track: true,
                current_step_valid: true,
                subtle_hint: None,
                suggested_next_step: suggestion.or_else(|| Some(encouragement.to_string())),
                confidence: STEP_CONFIDENCE,
            };
            let delta = StepDelta {
                step: Some(SolutionStep {
                    step_number: step_index,
                    user_work: work.to_string(),
                    expected_work: String::new(),
                    is_correct: true,
                    hint: None,
                    error_type: None,
                    timestamp_ms,
                }),
                advance: true,
                attempts_delta: 0,
                hints_delta: 0,
                completes: is_likely_solution(work, &self.options.variable),
            };
            (feedback, delta)
        } else {
            let problem_type = self.detect_problem_type(&state.problem.equation);
            let hint = self.generate_hint(validation.error_type(), problem_type, work, step_index);
            let feedback = StepFeedback {
                is_on_track: false,
                current_step_valid: false,
                subtle_hint: Some(hint.clone()),
                suggested_next_step: None,
                confidence: STEP_CONFIDENCE,
            };
            let delta = StepDelta {
                step: Some(SolutionStep {
                    step_number: step_index,
                    user_work: work.to_string(),
                    expected_work: String::new(),
                    is_correct: false,
                    hint: Some(hint),
                    error_type: validation.error_type(),
                    timestamp_ms,
                }),
                advance: false,
                attempts_delta: 1,
                hints_delta: 1,
                completes: false,
            };
            (feedback, delta)
        };

        StepReview {
            validation,
            feedback,
            delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::{SIGN_ERROR_HINTS, SOLVED_MESSAGE};
    use crate::rng::FixedHintRng;
    use crate::session::MathProblem;
    use crate::suggestion::CHECK_ANSWER;

    fn tutor() -> StepTutor<FixedHintRng> {
        StepTutor::new(ValidatorOptions::default(), FixedHintRng(0))
    }

    #[test]
    fn entry_points_delegate() {
        let mut t = tutor();
        assert!(t.normalize_and_validate_equation("$2(x+1) = 2x + 2$"));
        assert!(!t.normalize_and_validate_equation("2x + 3 = 7"));
        assert!(!t.normalize_and_validate_equation("1/0 = 5/0"));
        assert!(t.validate_step("x + 5 = 10", "x = 5").is_valid());
        assert_eq!(t.detect_problem_type("x^2 - 4 = 0"), ProblemType::Quadratic);
        assert_eq!(t.suggest_next_step("x=5"), Some(CHECK_ANSWER));
        assert_eq!(
            t.generate_hint(Some(ErrorType::SignError), ProblemType::Linear, "2x=10", 0),
            SIGN_ERROR_HINTS[0]
        );
        assert_eq!(
            t.generate_stuck_hint(ProblemType::Linear, 90_000),
            "Would you like a more detailed hint about the next step?"
        );
    }

    #[test]
    fn review_walks_a_problem_to_completion() {
        let mut t = tutor();
        let mut state = SolutionState::new(MathProblem::new("p", "2x + 3 = 7"), 0);

        let wrong = t.review_step(&state, "2x = 10", 1_000);
        assert!(!wrong.validation.is_valid());
        assert!(!wrong.feedback.is_on_track);
        assert!(wrong.feedback.subtle_hint.is_some());
        assert_eq!(wrong.delta.attempts_delta, 1);
        state.apply(wrong.delta, 1_000);
        assert_eq!(state.current_step, 0);

        let right = t.review_step(&state, "2x = 4", 2_000);
        assert!(right.validation.is_valid());
        assert_eq!(right.feedback.confidence, STEP_CONFIDENCE);
        state.apply(right.delta, 2_000);
        assert_eq!(state.current_step, 1);

        let done = t.review_step(&state, "x = 2", 3_000);
        assert!(done.validation.is_valid());
        assert!(done.delta.completes);
        assert_eq!(done.feedback.suggested_next_step.as_deref(), Some(CHECK_ANSWER));
        state.apply(done.delta, 3_000);
        assert!(state.is_complete);
        assert!((state.score - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn unfinished_work_is_not_recorded() {
        let mut t = tutor();
        let state = SolutionState::new(MathProblem::new("p", "2x + 3 = 7"), 0);
        let review = t.review_step(&state, "2x = 4 +", 500);
        assert_eq!(review.validation.error_type(), Some(ErrorType::IncompleteStep));
        assert!(review.delta.is_empty());
        assert!(review.feedback.is_on_track);
    }

    #[test]
    fn valid_step_without_suggestion_gets_encouragement() {
        let mut t = tutor();
        let state = SolutionState::new(MathProblem::new("p", "3 + 4 = 7"), 0);
        let review = t.review_step(&state, "7 = 7", 100);
        assert!(review.validation.is_valid());
        assert_eq!(
            review.feedback.suggested_next_step.as_deref(),
            Some("Good start! What's your next move?")
        );
        assert_ne!(review.feedback.suggested_next_step.as_deref(), Some(SOLVED_MESSAGE));
    }
}
