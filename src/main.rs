//! KeyForge - editor shortcut trainer for the terminal
//!
//! Practice VS Code and Vim shortcuts level by level. Progress is saved after
//! every command, so `play`, `hint`, `answer` and `submit` can be run as
//! separate invocations.

use clap::{Parser, Subcommand};
use keyforge::cli::{
    AnswerArgs, CliErrorKind, CliResult, ConfigArgs, ExitCode, GlobalArgs, HintArgs, LevelsArgs,
    PlayArgs, ResetArgs, StatsArgs, SubmitArgs,
};
use keyforge::config::Config;
use keyforge::constants::{APP_BINARY_NAME, LOG_ENV};
use keyforge::ui;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// KeyForge - train editor keyboard shortcuts
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start or continue training
    Play(PlayArgs),
    /// Submit an answer for the current level
    Submit(SubmitArgs),
    /// Reveal the next hint for the current level
    Hint(HintArgs),
    /// Show the answer for the current level
    Answer(AnswerArgs),
    /// List levels and their completion state
    Levels(LevelsArgs),
    /// Show training statistics
    Stats(StatsArgs),
    /// Reset progress
    Reset(ResetArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Disables colors when configured off or when stdout is not a terminal.
fn init_color() {
    let enabled = Config::load().map_or(true, |config| config.ui.color);
    if !enabled || !std::io::stdout().is_terminal() {
        crossterm::style::force_color_output(false);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let global = &cli.global;
    match &cli.command {
        Command::Play(args) => args.execute(global),
        Command::Submit(args) => args.execute(global),
        Command::Hint(args) => args.execute(global),
        Command::Answer(args) => args.execute(global),
        Command::Levels(args) => args.execute(global),
        Command::Stats(args) => args.execute(global),
        Command::Reset(args) => args.execute(global),
        Command::Config(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    init_color();

    let code = match run(&cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            // A wrong answer was already reported on stdout
            if e.kind != CliErrorKind::WrongAnswer {
                eprintln!("{}", ui::render_error(&e.message));
            }
            e.exit_code()
        }
    };

    std::process::exit(code.code());
}
