//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{Config, InputMode};
use crate::constants::APP_NAME;
use crate::models::KeymapProfile;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the config file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Default levels directory
    #[arg(long, value_name = "DIR")]
    levels_path: Option<PathBuf>,

    /// Default data directory for progress and statistics
    #[arg(long, value_name = "DIR")]
    data_path: Option<PathBuf>,

    /// Default keymap profile (vscode or vim)
    #[arg(long, value_name = "PROFILE")]
    default_profile: Option<String>,

    /// Answer input for `play` (line or capture)
    #[arg(long, value_name = "MODE")]
    input_mode: Option<String>,

    /// Colored output (true or false)
    #[arg(long, value_name = "BOOL")]
    color: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    game: GameOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    levels_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<String>,
}

#[derive(Serialize, Debug)]
struct GameOutput {
    profile: String,
    input_mode: String,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    color: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.levels_path.is_none()
            && self.data_path.is_none()
            && self.default_profile.is_none()
            && self.input_mode.is_none()
            && self.color.is_none()
    }

    /// Applies the given options to `config`.
    fn apply(&self, config: &mut Config) -> CliResult<()> {
        if let Some(path) = &self.levels_path {
            if !path.is_dir() {
                return Err(CliError::validation(format!(
                    "Levels directory does not exist: {}",
                    path.display()
                )));
            }
            config.paths.levels_dir = Some(path.clone());
        }

        if let Some(path) = &self.data_path {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create data directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.data_dir = Some(path.clone());
        }

        if let Some(profile) = &self.default_profile {
            config.game.profile = match profile.parse::<KeymapProfile>() {
                Ok(KeymapProfile::Both) | Err(_) => {
                    return Err(CliError::validation(
                        "Invalid profile. Must be 'vscode' or 'vim'",
                    ))
                }
                Ok(profile) => profile,
            };
        }

        if let Some(mode) = &self.input_mode {
            config.game.input_mode = mode
                .parse::<InputMode>()
                .map_err(|_| CliError::validation("Invalid input mode. Must be 'line' or 'capture'"))?;
        }

        if let Some(color) = self.color {
            config.ui.color = color;
        }

        Ok(())
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --levels-path, --data-path, --default-profile, --input-mode or --color",
            ));
        }

        let mut config = Config::load().unwrap_or_default();
        self.apply(&mut config)?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let config_file = Config::config_file_path().map_err(|e| CliError::io(format!("{e:#}")))?;
    let output = ConfigOutput {
        config_file: config_file.to_string_lossy().to_string(),
        paths: PathsOutput {
            levels_dir: config
                .paths
                .levels_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            data_dir: config
                .paths
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        game: GameOutput {
            profile: config.game.profile.id().to_string(),
            input_mode: config.game.input_mode.id().to_string(),
        },
        ui: UiOutput {
            color: config.ui.color,
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();

    println!("Paths:");
    match &config.paths.levels_dir {
        Some(path) => println!("  Levels Directory: {}", path.display()),
        None => println!("  Levels Directory: (default)"),
    }
    match &config.paths.data_dir {
        Some(path) => println!("  Data Directory:   {}", path.display()),
        None => println!("  Data Directory:   (default)"),
    }
    println!();

    println!("Game:");
    println!("  Profile:    {}", config.game.profile);
    println!("  Input Mode: {}", config.game.input_mode.id());
    println!();

    println!("UI:");
    println!("  Color: {}", config.ui.color);
    println!();
}
