//! Host platform detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable that overrides platform detection.
pub const PLATFORM_ENV: &str = "KEYFORGE_PLATFORM";

/// Platform whose shortcut variant a session is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS (Cmd-based shortcuts)
    MacOs,
    /// Windows
    Windows,
    /// Linux and every other Unix
    Linux,
}

impl Platform {
    /// Detects the current platform from the compile target.
    ///
    /// Anything that is neither macOS nor Windows is treated as Linux.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Detects the platform, honouring `KEYFORGE_PLATFORM` when it names one.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(PLATFORM_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unknown {PLATFORM_ENV} value: {value}");
                Self::detect()
            }),
            Err(_) => Self::detect(),
        }
    }

    /// Identifier used in level files and JSON output.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Linux => "Linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "macos" | "mac" | "darwin" => Ok(Self::MacOs),
            "windows" | "win" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}
