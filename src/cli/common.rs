//! Shared types for CLI commands: errors, exit codes and global options.

use crate::config::Config;
use crate::engine::{Game, GameError};
use crate::models::{KeymapProfile, Platform};
use clap::Args;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded (a wrong answer is still a success)
    Success = 0,
    /// Runtime failure: I/O, missing levels, corrupt files
    Error = 1,
    /// Invalid arguments or configuration values
    Usage = 2,
    /// Wrong answer in `submit --strict`
    WrongAnswer = 3,
}

impl ExitCode {
    /// Numeric code passed to the OS.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// File system or terminal failure
    Io,
    /// Bad input or state
    Validation,
    /// Answer did not match in strict mode
    WrongAnswer,
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category
    pub kind: CliErrorKind,
    /// Message shown to the user
    pub message: String,
}

impl CliError {
    /// I/O failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Invalid input or state.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Wrong answer under `--strict`.
    pub fn wrong_answer(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::WrongAnswer,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Io => ExitCode::Error,
            CliErrorKind::Validation => ExitCode::Usage,
            CliErrorKind::WrongAnswer => ExitCode::WrongAnswer,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<GameError> for CliError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::NoActiveLevel => Self::validation(err.to_string()),
            GameError::Storage(e) => Self::io(format!("{e:#}")),
            other => Self::io(other.to_string()),
        }
    }
}

/// Result type of command handlers.
pub type CliResult<T> = Result<T, CliError>;

fn parse_profile(value: &str) -> Result<KeymapProfile, String> {
    match value.parse::<KeymapProfile>()? {
        KeymapProfile::Both => Err("session profile must be 'vscode' or 'vim'".to_string()),
        profile => Ok(profile),
    }
}

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Keymap profile to train (vscode or vim)
    #[arg(long, global = true, value_name = "PROFILE", value_parser = parse_profile)]
    pub profile: Option<KeymapProfile>,

    /// Directory containing level files
    #[arg(long, global = true, value_name = "DIR")]
    pub levels_dir: Option<PathBuf>,

    /// Directory for progress.json and stats.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Settings after merging flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct Session {
    /// Loaded configuration
    pub config: Config,
    /// Resolved levels directory
    pub levels_dir: PathBuf,
    /// Resolved data directory
    pub data_dir: PathBuf,
    /// Resolved keymap profile
    pub profile: KeymapProfile,
    /// Platform answers are checked against
    pub platform: Platform,
}

impl GlobalArgs {
    /// Loads the config file and resolves directories and profile.
    pub fn session(&self) -> CliResult<Session> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        Ok(self.session_with(config))
    }

    /// Resolves directories and profile against an already loaded `config`.
    #[must_use]
    pub fn session_with(&self, config: Config) -> Session {
        let data_dir = config.resolve_data_dir(self.data_dir.as_deref());
        let levels_dir = config.resolve_levels_dir(self.levels_dir.as_deref(), &data_dir);
        let profile = self.profile.unwrap_or(config.game.profile);

        debug!(
            "Levels: {}, data: {}, profile: {profile}",
            levels_dir.display(),
            data_dir.display()
        );

        Session {
            config,
            levels_dir,
            data_dir,
            profile,
            platform: Platform::from_env(),
        }
    }

    /// Opens a game session with the resolved settings.
    pub fn open_game(&self) -> CliResult<Game> {
        self.session()?.open_game()
    }
}

impl Session {
    /// Loads the levels and opens the stores.
    pub fn open_game(&self) -> CliResult<Game> {
        Ok(Game::open(
            &self.levels_dir,
            &self.data_dir,
            self.profile,
            self.platform,
        )?)
    }

    /// Data directory of the session.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
