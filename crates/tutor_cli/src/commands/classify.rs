use anyhow::Result;
use clap::Args;

use super::{print_json, CommandContext};
use crate::json_types::{ClassifyJsonOutput, SCHEMA_VERSION};

/// Arguments for the classify subcommand
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Problem text, e.g. "x^2 - 4 = 0"
    pub problem: String,
}

pub fn run(args: ClassifyArgs, ctx: &mut CommandContext) -> Result<()> {
    let problem_type = ctx.tutor.detect_problem_type(&args.problem);

    if ctx.is_json() {
        return print_json(&ClassifyJsonOutput {
            schema_version: SCHEMA_VERSION,
            ok: true,
            problem: args.problem,
            problem_type,
        });
    }

    println!("{}", problem_type);
    Ok(())
}
