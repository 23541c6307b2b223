use crate::hints::is_likely_solution;

pub const CHECK_ANSWER: &str = "You're done! Check your answer by substituting back.";
pub const COMBINE_TERMS: &str = "Try combining like terms or moving variables to one side";
pub const ISOLATE_VARIABLE: &str = "What operation will help isolate the variable?";
pub const INVERSE_OPERATION: &str = "Use the inverse operation to isolate the variable";

/// Suggest the kind of move to make next, from the shape of `work` alone.
///
/// A finished answer is recognised first, so `x = 5` gets the
/// check-your-answer suggestion rather than a combine-terms one.
pub fn suggest_next_step(work: &str, variable: &str) -> Option<&'static str> {
    if is_likely_solution(work, variable) {
        return Some(CHECK_ANSWER);
    }

    let work = work.to_lowercase();
    let variable = variable.to_lowercase();
    if !work.contains(&variable) {
        return None;
    }

    let after_equals = work.split_once('=').map_or(work.as_str(), |(_, rhs)| rhs);
    if after_equals.chars().any(|c| c.is_ascii_digit()) {
        return Some(COMBINE_TERMS);
    }
    if work.contains('+') {
        return Some(ISOLATE_VARIABLE);
    }
    if work.contains('*') || work.contains('/') {
        return Some(INVERSE_OPERATION);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggest(work: &str) -> Option<&'static str> {
        suggest_next_step(work, "x")
    }

    #[test]
    fn final_answer_gets_check_suggestion() {
        assert_eq!(suggest("x=5"), Some(CHECK_ANSWER));
        assert_eq!(suggest("x = -1/2"), Some(CHECK_ANSWER));
    }

    #[test]
    fn shape_based_suggestions() {
        assert_eq!(suggest("2x + 3 = 7"), Some(COMBINE_TERMS));
        assert_eq!(suggest("3x + 2"), Some(COMBINE_TERMS));
        assert_eq!(suggest("x + y = z"), Some(ISOLATE_VARIABLE));
        assert_eq!(suggest("x * a = b"), Some(INVERSE_OPERATION));
        assert_eq!(suggest("x/a = b"), Some(INVERSE_OPERATION));
    }

    #[test]
    fn nothing_to_suggest() {
        assert_eq!(suggest("3 + 4 = 7"), None);
        assert_eq!(suggest("x = y"), None);
        assert_eq!(suggest(""), None);
    }
}
