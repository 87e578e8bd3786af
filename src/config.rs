//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::models::KeymapProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "KEYFORGE_CONFIG_DIR";

/// Level directory looked up relative to the working directory.
pub const LOCAL_LEVELS_DIR: &str = "levels";

/// How answers are entered during `play`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Type the shortcut as text and press Enter
    #[default]
    Line,
    /// Press the shortcut itself
    Capture,
}

impl InputMode {
    /// Identifier used in the config file.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Capture => "capture",
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" | "text" => Ok(Self::Line),
            "capture" | "keys" => Ok(Self::Capture),
            other => Err(format!(
                "unknown input mode '{other}' (expected line or capture)"
            )),
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the level files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels_dir: Option<PathBuf>,
    /// Directory holding progress.json and stats.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Training preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameConfig {
    /// Keymap profile used when `--profile` is not given
    #[serde(default)]
    pub profile: KeymapProfile,
    /// Answer input mode for `play`
    #[serde(default)]
    pub input_mode: InputMode,
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/KeyForge/config.toml`
/// - macOS: `~/Library/Application Support/KeyForge/config.toml`
/// - Windows: `%APPDATA%\KeyForge\config.toml`
///
/// `KEYFORGE_CONFIG_DIR` replaces the directory.
///
/// # Validation
///
/// - `levels_dir` must exist and be a directory (if set)
/// - `data_dir` must not point at a file (if set)
/// - `profile` must be `vscode` or `vim`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Training preferences
    #[serde(default)]
    pub game: GameConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/KeyForge/`
    /// - macOS: `~/Library/Application Support/KeyForge/`
    /// - Windows: `%APPDATA%\KeyForge\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("KeyForge");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `config_path`.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `config_path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    config_dir.display()
                )
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        // Atomic rename
        fs::rename(&temp_path, config_path).with_context(|| {
            format!(
                "Failed to rename temp config file to: {}",
                config_path.display()
            )
        })?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(levels_dir) = &self.paths.levels_dir {
            if !levels_dir.is_dir() {
                anyhow::bail!(
                    "Levels directory does not exist: {}",
                    levels_dir.display()
                );
            }
        }

        if let Some(data_dir) = &self.paths.data_dir {
            if data_dir.exists() && !data_dir.is_dir() {
                anyhow::bail!(
                    "Data directory path is not a directory: {}",
                    data_dir.display()
                );
            }
        }

        if self.game.profile == KeymapProfile::Both {
            anyhow::bail!("Keymap profile must be 'vscode' or 'vim'");
        }

        Ok(())
    }

    /// Data directory: `flag`, then the configured one, then the platform
    /// default (`~/.local/share/keyforge` on Linux).
    #[must_use]
    pub fn resolve_data_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.paths.data_dir.clone())
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Levels directory: `flag`, then the configured one, then `./levels`
    /// when present, then `<data_dir>/levels`.
    #[must_use]
    pub fn resolve_levels_dir(&self, flag: Option<&Path>, data_dir: &Path) -> PathBuf {
        if let Some(dir) = flag.map(Path::to_path_buf).or_else(|| self.paths.levels_dir.clone()) {
            return dir;
        }

        let local = PathBuf::from(LOCAL_LEVELS_DIR);
        if local.is_dir() {
            local
        } else {
            data_dir.join(LOCAL_LEVELS_DIR)
        }
    }

    fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("keyforge"))
            .or_else(|| dirs::home_dir().map(|home| home.join(".keyforge")))
            .unwrap_or_else(|| PathBuf::from(".keyforge"))
    }
}
