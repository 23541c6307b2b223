mod commands;
mod config;
mod json_types;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::check::{CheckArgs, ValidateArgs};
use commands::classify::ClassifyArgs;
use commands::config_cmd::ConfigCommand;
use commands::hint::{HintArgs, StuckArgs, SuggestArgs};
use commands::replay::ReplayArgs;
use commands::{print_json, CommandContext, OutputFormat};
use config::{TutorConfig, DEFAULT_CONFIG_PATH};
use json_types::ErrorJsonOutput;
use tutor_engine::{SeededHintRng, StepTutor};

#[derive(Parser, Debug)]
#[command(
    name = "step-tutor",
    version,
    about = "Check algebra solution steps and pick hints"
)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed for hint phrasing (overrides hint_seed from the config)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Judge one step against the previous one
    Check(CheckArgs),
    /// Check that both sides of an equation are equivalent
    Validate(ValidateArgs),
    /// Detect the problem family
    Classify(ClassifyArgs),
    /// Pick a hint for an error or a step
    Hint(HintArgs),
    /// Suggest the kind of move to make next
    Suggest(SuggestArgs),
    /// Hint for a student who has stopped writing
    Stuck(StuckArgs),
    /// Replay a transcript file through the tutor
    Replay(ReplayArgs),
    /// Show or restore the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Tutor configured from the config file and command-line overrides.
fn build_context(
    cli_config: &Path,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<CommandContext> {
    let config = TutorConfig::load(cli_config);
    let options = config.to_options();
    options.validate()?;

    let rng = match seed.or(config.hint_seed) {
        Some(seed) => SeededHintRng::from_seed(seed),
        None => SeededHintRng::from_entropy(),
    };
    Ok(CommandContext {
        tutor: StepTutor::new(options, rng),
        format,
    })
}

fn run(cli: Cli) -> Result<()> {
    let context = || build_context(&cli.config, cli.seed, cli.format);

    match cli.command {
        Command::Check(args) => commands::check::run_check(args, &mut context()?),
        Command::Validate(args) => commands::check::run_validate(args, &mut context()?),
        Command::Classify(args) => commands::classify::run(args, &mut context()?),
        Command::Hint(args) => commands::hint::run_hint(args, &mut context()?),
        Command::Suggest(args) => commands::hint::run_suggest(args, &mut context()?),
        Command::Stuck(args) => commands::hint::run_stuck(args, &mut context()?),
        Command::Replay(args) => commands::replay::run(args, &mut context()?),
        Command::Config(command) => commands::config_cmd::run(command, &cli.config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.format;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                let _ = print_json(&ErrorJsonOutput::new(format!("{:#}", e)));
            } else {
                eprintln!("error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
