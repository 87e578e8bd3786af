//! Level definitions as read from the level files.

use crate::keys::KeySequence;
use crate::models::Platform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Everyday shortcuts
    Beginner,
    /// Navigation and multi-cursor editing
    Intermediate,
    /// Rarely used but powerful shortcuts
    Advanced,
}

impl Difficulty {
    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Keymap scheme a level (or a session) targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeymapProfile {
    /// VS Code default keybindings
    #[default]
    Vscode,
    /// Vim normal/command mode
    Vim,
    /// Applies to every session profile
    Both,
}

impl KeymapProfile {
    /// Identifier used in level files, config and CLI flags.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Vscode => "vscode",
            Self::Vim => "vim",
            Self::Both => "both",
        }
    }

    /// Returns true if a level with this profile is playable in `session`.
    #[must_use]
    pub fn applies_to(&self, session: Self) -> bool {
        *self == Self::Both || *self == session
    }
}

impl fmt::Display for KeymapProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for KeymapProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vscode" | "code" => Ok(Self::Vscode),
            "vim" => Ok(Self::Vim),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown keymap profile '{other}' (expected vscode or vim)")),
        }
    }
}

/// Expected shortcut for each platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformKeys {
    /// macOS variant
    #[serde(default)]
    pub macos: KeySequence,
    /// Windows variant
    #[serde(default)]
    pub windows: KeySequence,
    /// Linux variant
    #[serde(default)]
    pub linux: KeySequence,
}

impl PlatformKeys {
    /// The variant for `platform`.
    #[must_use]
    pub fn for_platform(&self, platform: Platform) -> &KeySequence {
        match platform {
            Platform::MacOs => &self.macos,
            Platform::Windows => &self.windows,
            Platform::Linux => &self.linux,
        }
    }

    /// Copy with every variant in canonical spelling.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            macos: self.macos.normalized(),
            windows: self.windows.normalized(),
            linux: self.linux.normalized(),
        }
    }
}

/// A single training level.
///
/// Levels are immutable after loading and shared as `Arc<Level>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Unique identifier, e.g. `001-save-file`
    pub id: String,
    /// Short title
    pub name: String,
    /// Grouping shown in listings (e.g. "file", "editing")
    #[serde(default)]
    pub category: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Keymap profile the level belongs to
    #[serde(default)]
    pub profile: KeymapProfile,
    /// What the user has to achieve
    #[serde(default)]
    pub description: String,
    /// Optional narrative framing
    #[serde(default)]
    pub scenario: String,
    /// Per-platform answer
    pub expected_keys: PlatformKeys,
    /// Hints, revealed one at a time
    #[serde(default)]
    pub hints: Vec<String>,
    /// Explanation shown together with the answer
    #[serde(default)]
    pub tips: String,
    /// Levels that should be completed first
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Level {
    /// Rewrites the expected keys to canonical tokens, so level files may
    /// spell keys with any accepted alias (`Command`, `⌘`, `escape`).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.expected_keys = self.expected_keys.normalized();
        self
    }
}
