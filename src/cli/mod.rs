//! CLI command handlers for KeyForge.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method; state is
//! loaded from disk on every invocation, so commands compose across separate
//! runs (`play`, then `hint`, then `submit`).

pub mod answer;
pub mod common;
pub mod config;
pub mod hint;
pub mod levels;
pub mod play;
pub mod reset;
pub mod stats;
pub mod submit;

// Re-export types used by main.rs and tests
pub use answer::AnswerArgs;
pub use common::{CliError, CliErrorKind, CliResult, ExitCode, GlobalArgs};
pub use config::ConfigArgs;
pub use hint::HintArgs;
pub use levels::LevelsArgs;
pub use play::PlayArgs;
pub use reset::ResetArgs;
pub use stats::StatsArgs;
pub use submit::SubmitArgs;
