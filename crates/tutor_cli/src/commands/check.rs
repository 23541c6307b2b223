//! `check` and `validate` subcommand handlers.

use anyhow::Result;
use clap::Args;

use tutor_engine::normalize;

use super::{print_json, CommandContext};
use crate::json_types::{CheckJsonOutput, ValidateJsonOutput, SCHEMA_VERSION};

/// Arguments for the check subcommand
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The previous step, e.g. "2x + 3 = 7"
    pub previous: String,

    /// The step to judge, e.g. "2x = 4"
    pub current: String,

    /// Original problem text, used to pick hints (defaults to the previous step)
    #[arg(long)]
    pub problem: Option<String>,

    /// Zero-based index of the step within the solution
    #[arg(long, default_value_t = 0)]
    pub step: usize,
}

pub fn run_check(args: CheckArgs, ctx: &mut CommandContext) -> Result<()> {
    let validation = ctx.tutor.validate_step(&args.previous, &args.current);
    let problem = args.problem.as_deref().unwrap_or(&args.previous);
    let problem_type = ctx.tutor.detect_problem_type(problem);

    let hint = if validation.is_valid() {
        None
    } else {
        Some(ctx.tutor.generate_hint(
            validation.error_type(),
            problem_type,
            &args.current,
            args.step,
        ))
    };
    let suggestion = if validation.is_valid() {
        ctx.tutor.suggest_next_step(&args.current).map(str::to_string)
    } else {
        None
    };

    if ctx.is_json() {
        return print_json(&CheckJsonOutput {
            schema_version: SCHEMA_VERSION,
            ok: true,
            previous: args.previous,
            current: args.current,
            valid: validation.is_valid(),
            error_type: validation.error_type(),
            message: validation.message().to_string(),
            problem_type,
            hint,
            suggestion,
        });
    }

    match validation.error_type() {
        None => println!("VALID: {}", validation.message()),
        Some(error_type) => println!("INVALID ({}): {}", error_type, validation.message()),
    }
    if let Some(hint) = hint {
        println!("hint: {}", hint);
    }
    if let Some(suggestion) = suggestion {
        println!("next: {}", suggestion);
    }
    Ok(())
}

/// Arguments for the validate subcommand
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Equation whose two sides should be equivalent, e.g. "2(x+1) = 2x + 2"
    pub equation: String,
}

pub fn run_validate(args: ValidateArgs, ctx: &mut CommandContext) -> Result<()> {
    let valid = ctx.tutor.normalize_and_validate_equation(&args.equation);
    let normalized = normalize(&args.equation);

    if ctx.is_json() {
        return print_json(&ValidateJsonOutput {
            schema_version: SCHEMA_VERSION,
            ok: true,
            equation: args.equation,
            normalized,
            valid,
        });
    }

    println!("{}: {}", normalized, if valid { "valid" } else { "invalid" });
    Ok(())
}
