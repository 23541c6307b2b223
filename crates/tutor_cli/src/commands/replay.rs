//! replay subcommand handler.
//!
//! Feeds a transcript through the tutor the way a live session would: the
//! first non-empty line is the problem, each later line one attempt at the
//! next step.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;

use tutor_engine::{MathProblem, SolutionState};

use super::{print_json, CommandContext};
use crate::json_types::{ReplayJsonOutput, ReplayStepJson, SCHEMA_VERSION};

/// Arguments for the replay subcommand
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Transcript file: problem on the first line, one step per line after it
    pub file: PathBuf,
}

pub fn run(args: ReplayArgs, ctx: &mut CommandContext) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read transcript {}", args.file.display()))?;

    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let Some((_, problem_text)) = lines.next() else {
        bail!("transcript {} has no problem line", args.file.display());
    };

    let started = Instant::now();
    let elapsed_ms = || started.elapsed().as_millis() as u64;

    let problem = MathProblem::new(args.file.display().to_string(), problem_text);
    let problem_type = ctx.tutor.detect_problem_type(&problem.equation);
    let mut state = SolutionState::new(problem, 0);
    let mut steps = Vec::new();

    for (line, work) in lines {
        if state.is_complete {
            tracing::info!(line, "problem already solved, ignoring remaining lines");
            break;
        }
        let review = ctx.tutor.review_step(&state, work, elapsed_ms());
        let judged = !review.delta.is_empty();
        steps.push(ReplayStepJson {
            line,
            work: work.to_string(),
            judged,
            valid: review.validation.is_valid(),
            error_type: review.validation.error_type(),
            message: review.validation.message().to_string(),
            hint: review.feedback.subtle_hint.clone(),
            suggestion: review.feedback.suggested_next_step.clone(),
        });
        state.apply(review.delta, elapsed_ms());
    }

    let stats = state.stats(elapsed_ms());

    if ctx.is_json() {
        return print_json(&ReplayJsonOutput {
            schema_version: SCHEMA_VERSION,
            ok: true,
            problem: state.problem.equation.clone(),
            problem_type,
            steps,
            complete: state.is_complete,
            stats,
        });
    }

    println!("problem: {} ({})", state.problem.equation, problem_type);
    for step in &steps {
        let verdict = match (step.judged, step.error_type) {
            (false, _) => "INCOMPLETE, not judged".to_string(),
            (true, None) => "VALID".to_string(),
            (true, Some(error_type)) => format!("INVALID ({}): {}", error_type, step.message),
        };
        println!("line {}: {} -> {}", step.line, step.work, verdict);
        if let Some(hint) = &step.hint {
            println!("    hint: {}", hint);
        }
        if let Some(suggestion) = &step.suggestion {
            println!("    next: {}", suggestion);
        }
    }
    println!(
        "steps: {}  correct: {}  incorrect: {}  hints: {}  score: {:.2}  complete: {}",
        stats.total_steps,
        stats.correct_steps,
        stats.incorrect_attempts,
        stats.hints_used,
        stats.score,
        if state.is_complete { "yes" } else { "no" }
    );
    Ok(())
}
