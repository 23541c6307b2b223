//! Session data owned by the caller.
//!
//! The engine never mutates a session. [`crate::StepTutor::review_step`]
//! returns a [`StepDelta`] and the caller decides whether to apply it.

use serde::{Deserialize, Serialize};

use crate::equation::extract_equation;
use crate::types::{ErrorType, StepValidation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A problem as captured from the student's source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathProblem {
    pub id: String,
    /// Raw text as captured
    pub extracted_text: String,
    /// The equation part of `extracted_text`
    pub equation: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl MathProblem {
    /// Build a problem from captured text. A lead-in such as
    /// `Solve for x:` is dropped from the equation.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let extracted_text = text.into();
        let body = extracted_text
            .rsplit_once(':')
            .map_or(extracted_text.as_str(), |(_, rest)| rest);
        let equation = extract_equation(body).unwrap_or(body.trim()).to_string();
        Self {
            id: id.into(),
            extracted_text,
            equation,
            difficulty: Difficulty::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// One recorded step of a solution attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub step_number: usize,
    pub user_work: String,
    /// Reference work, when the caller has one
    #[serde(default)]
    pub expected_work: String,
    pub is_correct: bool,
    pub hint: Option<String>,
    pub error_type: Option<ErrorType>,
    pub timestamp_ms: u64,
}

/// What the student sees after writing a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFeedback {
    pub is_on_track: bool,
    pub current_step_valid: bool,
    pub subtle_hint: Option<String>,
    pub suggested_next_step: Option<String>,
    /// 0.0 to 1.0
    pub confidence: f32,
}

/// Confidence reported for a judged step.
pub const STEP_CONFIDENCE: f32 = 0.85;

/// Guidance shown before the first step.
pub fn initial_feedback() -> StepFeedback {
    StepFeedback {
        is_on_track: true,
        current_step_valid: true,
        subtle_hint: Some("Start by identifying what you're solving for".to_string()),
        suggested_next_step: None,
        confidence: 1.0,
    }
}

/// A step is ready to judge once it has an `=` and does not end in a
/// dangling `+` or `-`.
pub fn is_step_complete(work: &str) -> bool {
    let work = work.trim_end();
    work.contains('=') && !work.ends_with('+') && !work.ends_with('-')
}

/// Change to apply to a [`SolutionState`] after a review.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepDelta {
    pub step: Option<SolutionStep>,
    /// Move on to the next step
    pub advance: bool,
    pub attempts_delta: u32,
    pub hints_delta: u32,
    /// The step is a final answer
    pub completes: bool,
}

impl StepDelta {
    pub fn is_empty(&self) -> bool {
        self == &StepDelta::default()
    }
}

/// Result of reviewing one piece of work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReview {
    pub validation: StepValidation,
    pub feedback: StepFeedback,
    pub delta: StepDelta,
}

/// Progress through one problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionState {
    pub problem: MathProblem,
    pub steps: Vec<SolutionStep>,
    pub current_step: usize,
    pub is_complete: bool,
    pub score: f32,
    pub start_ms: u64,
    pub end_ms: Option<u64>,
    /// Incorrect attempts so far
    pub attempt_count: u32,
    pub hints_used: u32,
}

impl SolutionState {
    pub fn new(problem: MathProblem, start_ms: u64) -> Self {
        Self {
            problem,
            steps: Vec::new(),
            current_step: 0,
            is_complete: false,
            score: 0.0,
            start_ms,
            end_ms: None,
            attempt_count: 0,
            hints_used: 0,
        }
    }

    /// Last step accepted as correct.
    pub fn last_correct_step(&self) -> Option<&SolutionStep> {
        self.steps.iter().rev().find(|s| s.is_correct)
    }

    pub fn correct_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_correct).count()
    }

    /// Apply a review's delta. A completed state ignores further deltas.
    pub fn apply(&mut self, delta: StepDelta, timestamp_ms: u64) {
        if self.is_complete {
            tracing::debug!(problem = %self.problem.id, "ignoring delta for completed problem");
            return;
        }
        if let Some(step) = delta.step {
            self.steps.push(step);
        }
        if delta.advance {
            self.current_step += 1;
        }
        self.attempt_count += delta.attempts_delta;
        self.hints_used += delta.hints_delta;
        if delta.completes {
            self.is_complete = true;
            self.end_ms = Some(timestamp_ms);
        }
        self.score = self.compute_score();
    }

    /// Correct steps over everything attempted; 0 before any attempt.
    fn compute_score(&self) -> f32 {
        let correct = self.correct_steps() as f32;
        let attempted = correct + self.attempt_count as f32;
        if attempted == 0.0 {
            0.0
        } else {
            correct / attempted
        }
    }

    /// Summary at `now_ms` (or at completion time, if complete).
    pub fn stats(&self, now_ms: u64) -> SolutionStats {
        let end = self.end_ms.unwrap_or(now_ms);
        SolutionStats {
            total_steps: self.steps.len(),
            correct_steps: self.correct_steps(),
            incorrect_attempts: self.attempt_count,
            hints_used: self.hints_used,
            time_taken_ms: end.saturating_sub(self.start_ms),
            score: self.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionStats {
    pub total_steps: usize,
    pub correct_steps: usize,
    pub incorrect_attempts: u32,
    pub hints_used: u32,
    pub time_taken_ms: u64,
    pub score: f32,
}
