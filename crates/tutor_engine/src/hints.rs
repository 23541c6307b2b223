//! Hint selection.
//!
//! Hints nudge without solving: they name the kind of move to make, never
//! the expected next line.

use regex::Regex;
use std::sync::LazyLock;

use crate::problem_type::ProblemType;
use crate::rng::{HintRng, SeededHintRng};
use crate::types::ErrorType;

pub const SIGN_ERROR_HINTS: [&str; 4] = [
    "Check your signs - did you apply the operation to both sides?",
    "When moving terms across the equals sign, remember to change the sign",
    "Double-check the signs in your last step",
    "Be careful with negative signs when distributing",
];

pub const CALCULATION_ERROR_HINTS: [&str; 4] = [
    "Double-check your arithmetic",
    "Try calculating that step again carefully",
    "The numbers don't quite add up - review your calculation",
    "Take another look at that calculation",
];

pub const INCOMPLETE_STEP_HINTS: [&str; 3] = [
    "This step looks incomplete - what's the next operation?",
    "Keep going - you're not quite finished with this step",
    "What should you do with both sides of the equation?",
];

pub const SOLVED_MESSAGE: &str = "Great work! You've found the solution.";

static RE_FINAL_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][a-z0-9_]*)=-?[0-9.]+(?:/-?[0-9.]+)?$").expect("valid regex literal")
});

/// Whether `work` reads like a final answer: `x=<number>` or
/// `x=<number>/<number>`, ignoring whitespace and case.
pub fn is_likely_solution(work: &str, variable: &str) -> bool {
    let cleaned: String = work
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    RE_FINAL_ANSWER
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .is_some_and(|name| name.as_str() == variable.to_lowercase())
}

fn algebraic_mistake_hint(problem: ProblemType) -> &'static str {
    match problem {
        ProblemType::Linear => "Remember: whatever you do to one side, do to the other",
        ProblemType::Quadratic => "Did you factor correctly? Check each term",
        ProblemType::Rational => "When working with fractions, find a common denominator",
        ProblemType::Radical => "Remember to square both sides to eliminate the square root",
        _ => "This step doesn't follow algebraically from the previous one",
    }
}

fn wrong_approach_hint(problem: ProblemType) -> &'static str {
    match problem {
        ProblemType::Linear => "Try isolating the variable by moving constants to one side",
        ProblemType::Quadratic => "Have you considered factoring or using the quadratic formula?",
        ProblemType::Rational => "Consider multiplying both sides by the denominator",
        ProblemType::Radical => "Try isolating the radical first before squaring",
        _ => "Think about a different approach to solve this",
    }
}

/// Guidance for a step with no detected error, by problem family and
/// how far into the solution the student is.
pub fn step_guidance(problem: ProblemType, step_index: usize) -> &'static str {
    match (problem, step_index) {
        (ProblemType::Linear, 0) => "Start by moving all variable terms to one side",
        (ProblemType::Linear, 1) => "Now combine like terms",
        (ProblemType::Linear, 2) => "What operation will isolate the variable?",
        (ProblemType::Linear, _) => "You're close - simplify your answer",

        (ProblemType::Quadratic, 0) => "First, get everything on one side so it equals zero",
        (ProblemType::Quadratic, 1) => "Can this expression be factored?",
        (ProblemType::Quadratic, 2) => "Set each factor equal to zero",
        (ProblemType::Quadratic, _) => "Solve for each possible value of x",

        (ProblemType::Rational, 0) => "Consider multiplying both sides by the common denominator",
        (ProblemType::Rational, 1) => "Now you have an equation without fractions - solve it",
        (ProblemType::Rational, _) => "Don't forget to check your answer in the original equation",

        (ProblemType::Radical, 0) => "First, isolate the square root on one side",
        (ProblemType::Radical, 1) => "Now square both sides to eliminate the radical",
        (ProblemType::Radical, 2) => "Solve the resulting equation",
        (ProblemType::Radical, _) => "Remember to check for extraneous solutions",

        (ProblemType::Logarithmic, 0) => "Consider using logarithm properties to simplify",
        (ProblemType::Logarithmic, 1) => "Can you convert to exponential form?",
        (ProblemType::Logarithmic, _) => "Solve for the variable",

        (ProblemType::Trigonometric, _) => {
            "Use trigonometric identities or inverse functions as needed"
        }
        (ProblemType::Arithmetic, _) => "Perform the operations step by step",
        (ProblemType::System, _) => "Use substitution or elimination to solve the system",
        (ProblemType::Inequality, _) => {
            "Remember: multiplying by a negative flips the inequality sign"
        }
    }
}

/// Hint for a student who has not written anything for `elapsed_ms`.
pub fn stuck_hint(problem: ProblemType, elapsed_ms: u64) -> &'static str {
    match elapsed_ms {
        0..=29_999 => "Take your time and think about what you've learned",
        30_000..=59_999 => match problem {
            ProblemType::Linear => {
                "Remember: isolate the variable by performing inverse operations"
            }
            ProblemType::Quadratic => "Try factoring or using the quadratic formula",
            ProblemType::Rational => "Multiply by the common denominator to clear fractions",
            _ => "Break the problem down into smaller steps",
        },
        _ => "Would you like a more detailed hint about the next step?",
    }
}

/// Encouragement after a correct step.
pub fn next_step_encouragement(work: &str, variable: &str, step_index: usize) -> &'static str {
    if is_likely_solution(work, variable) {
        return SOLVED_MESSAGE;
    }
    match step_index {
        0 => "Good start! What's your next move?",
        1 => "You're on the right track. Keep simplifying.",
        2 => "Nice work. What operation comes next?",
        3 => "Almost there! Continue simplifying.",
        _ => "Looking good! Keep going.",
    }
}

/// Picks hints; owns the random source used for phrasing variety.
#[derive(Debug, Clone)]
pub struct HintSelector<R: HintRng = SeededHintRng> {
    rng: R,
}

impl HintSelector<SeededHintRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededHintRng::from_seed(seed))
    }
}

impl Default for HintSelector<SeededHintRng> {
    fn default() -> Self {
        Self::new(SeededHintRng::from_entropy())
    }
}

impl<R: HintRng> HintSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn choose(&mut self, options: &[&'static str]) -> &'static str {
        let index = self.rng.pick(options.len());
        options[index.min(options.len() - 1)]
    }

    /// Hint for the current step.
    ///
    /// With an error the hint is about the error; sign, calculation and
    /// incomplete-step hints vary in phrasing. Without one it is the
    /// problem-family guidance for `step_index`.
    pub fn generate_hint(
        &mut self,
        error: Option<ErrorType>,
        problem: ProblemType,
        _current_work: &str,
        step_index: usize,
    ) -> String {
        let hint = match error {
            Some(ErrorType::SignError) => self.choose(&SIGN_ERROR_HINTS),
            Some(ErrorType::CalculationError) => self.choose(&CALCULATION_ERROR_HINTS),
            Some(ErrorType::IncompleteStep) => self.choose(&INCOMPLETE_STEP_HINTS),
            Some(ErrorType::AlgebraicMistake) => algebraic_mistake_hint(problem),
            Some(ErrorType::WrongApproach) => wrong_approach_hint(problem),
            None => step_guidance(problem, step_index),
        };
        hint.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedHintRng;

    #[test]
    fn random_categories_stay_in_their_set() {
        let mut selector = HintSelector::seeded(7);
        for _ in 0..50 {
            let h = selector.generate_hint(Some(ErrorType::SignError), ProblemType::Linear, "2x=10", 0);
            assert!(SIGN_ERROR_HINTS.contains(&h.as_str()));
            let h = selector.generate_hint(
                Some(ErrorType::CalculationError),
                ProblemType::Quadratic,
                "",
                1,
            );
            assert!(CALCULATION_ERROR_HINTS.contains(&h.as_str()));
            let h = selector.generate_hint(Some(ErrorType::IncompleteStep), ProblemType::System, "", 2);
            assert!(INCOMPLETE_STEP_HINTS.contains(&h.as_str()));
        }
    }

    #[test]
    fn fixed_rng_selects_by_index() {
        let mut selector = HintSelector::new(FixedHintRng(2));
        assert_eq!(
            selector.generate_hint(Some(ErrorType::SignError), ProblemType::Linear, "", 0),
            SIGN_ERROR_HINTS[2]
        );
        let mut selector = HintSelector::new(FixedHintRng(10));
        assert_eq!(
            selector.generate_hint(Some(ErrorType::IncompleteStep), ProblemType::Linear, "", 0),
            INCOMPLETE_STEP_HINTS[2]
        );
    }

    #[test]
    fn deterministic_categories_use_problem_type() {
        let mut selector = HintSelector::new(FixedHintRng(0));
        assert_eq!(
            selector.generate_hint(Some(ErrorType::AlgebraicMistake), ProblemType::Radical, "", 0),
            "Remember to square both sides to eliminate the square root"
        );
        assert_eq!(
            selector.generate_hint(Some(ErrorType::AlgebraicMistake), ProblemType::Logarithmic, "", 0),
            "This step doesn't follow algebraically from the previous one"
        );
        assert_eq!(
            selector.generate_hint(Some(ErrorType::WrongApproach), ProblemType::Quadratic, "", 0),
            "Have you considered factoring or using the quadratic formula?"
        );
        assert_eq!(
            selector.generate_hint(Some(ErrorType::WrongApproach), ProblemType::System, "", 0),
            "Think about a different approach to solve this"
        );
    }

    #[test]
    fn guidance_progresses_with_step_index() {
        assert_eq!(step_guidance(ProblemType::Linear, 0), "Start by moving all variable terms to one side");
        assert_eq!(step_guidance(ProblemType::Linear, 3), "You're close - simplify your answer");
        assert_eq!(step_guidance(ProblemType::Linear, 99), step_guidance(ProblemType::Linear, 3));
        assert_eq!(step_guidance(ProblemType::Rational, 2), step_guidance(ProblemType::Rational, 5));
        assert_eq!(step_guidance(ProblemType::System, 0), step_guidance(ProblemType::System, 4));
    }

    #[test]
    fn stuck_hints_escalate() {
        assert_eq!(
            stuck_hint(ProblemType::Linear, 29_999),
            "Take your time and think about what you've learned"
        );
        assert_eq!(
            stuck_hint(ProblemType::Linear, 30_000),
            "Remember: isolate the variable by performing inverse operations"
        );
        assert_eq!(
            stuck_hint(ProblemType::Trigonometric, 45_000),
            "Break the problem down into smaller steps"
        );
        assert_eq!(
            stuck_hint(ProblemType::Quadratic, 60_000),
            "Would you like a more detailed hint about the next step?"
        );
    }

    #[test]
    fn final_answer_detection() {
        assert!(is_likely_solution("x=5", "x"));
        assert!(is_likely_solution(" X = -2.5 ", "x"));
        assert!(is_likely_solution("x = 3/4", "x"));
        assert!(is_likely_solution("x=-3/-4", "x"));
        assert!(!is_likely_solution("x = 2 + 3", "x"));
        assert!(!is_likely_solution("2x = 4", "x"));
        assert!(!is_likely_solution("y = 4", "x"));
        assert!(is_likely_solution("t = 4", "t"));
    }

    #[test]
    fn encouragement_after_correct_steps() {
        assert_eq!(next_step_encouragement("x = 5", "x", 2), SOLVED_MESSAGE);
        assert_eq!(next_step_encouragement("2x = 4", "x", 0), "Good start! What's your next move?");
        assert_eq!(next_step_encouragement("2x = 4", "x", 7), "Looking good! Keep going.");
    }
}
