//! `hint`, `suggest` and `stuck` subcommand handlers.

use anyhow::Result;
use clap::Args;

use tutor_engine::{ErrorType, ProblemType};

use super::{print_json, CommandContext};
use crate::json_types::{HintJsonOutput, SuggestJsonOutput, SCHEMA_VERSION};

/// Arguments for the hint subcommand
#[derive(Args, Debug)]
pub struct HintArgs {
    /// Problem family: linear, quadratic, rational, radical, trigonometric,
    /// logarithmic, arithmetic, system, inequality
    #[arg(long)]
    pub problem_type: ProblemType,

    /// Detected mistake: sign-error, calculation-error, algebraic-mistake,
    /// wrong-approach, incomplete-step
    #[arg(long)]
    pub error: Option<ErrorType>,

    /// The student's current work
    #[arg(long, default_value = "")]
    pub work: String,

    /// Zero-based index of the step within the solution
    #[arg(long, default_value_t = 0)]
    pub step: usize,
}

pub fn run_hint(args: HintArgs, ctx: &mut CommandContext) -> Result<()> {
    let hint = ctx
        .tutor
        .generate_hint(args.error, args.problem_type, &args.work, args.step);

    if ctx.is_json() {
        return print_json(&HintJsonOutput {
            schema_version: SCHEMA_VERSION,
            ok: true,
            problem_type: args.problem_type,
            error_type: args.error,
            hint,
        });
    }

    println!("{}", hint);
    Ok(())
}

/// Arguments for the suggest subcommand
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// The student's current work, e.g. "2x + 3 = 7"
    pub work: String,
}

pub fn run_suggest(args: SuggestArgs, ctx: &mut CommandContext) -> Result<()> {
    let suggestion = ctx.tutor.suggest_next_step(&args.work).map(str::to_string);

    if ctx.is_json() {
        return print_json(&SuggestJsonOutput {
            schema_version: SCHEMA_VERSION,
            ok: true,
            work: args.work,
            suggestion,
        });
    }

    println!("{}", suggestion.as_deref().unwrap_or("(no suggestion)"));
    Ok(())
}

/// Arguments for the stuck subcommand
#[derive(Args, Debug)]
pub struct StuckArgs {
    #[arg(long)]
    pub problem_type: ProblemType,

    /// Time since the student last wrote anything, in milliseconds
    #[arg(long)]
    pub elapsed_ms: u64,
}

pub fn run_stuck(args: StuckArgs, ctx: &mut CommandContext) -> Result<()> {
    let hint = ctx
        .tutor
        .generate_stuck_hint(args.problem_type, args.elapsed_ms);

    if ctx.is_json() {
        return print_json(&HintJsonOutput {
            schema_version: SCHEMA_VERSION,
            ok: true,
            problem_type: args.problem_type,
            error_type: None,
            hint,
        });
    }

    println!("{}", hint);
    Ok(())
}
