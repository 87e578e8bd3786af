//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the keyforge binary
pub fn keyforge_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keyforge")
}

pub const SAVE_LEVEL: &str = r#"
id: "001-save-file"
name: "Save File"
category: "file"
difficulty: beginner
profile: vscode
description: "Save the current file."
expected_keys:
  macos: ["Cmd", "S"]
  windows: ["Ctrl", "S"]
  linux: ["Ctrl", "S"]
hints:
  - "The most common shortcut of all."
  - "The letter is the first letter of 'Save'."
tips: "Save early and often."
"#;

pub const UNDO_LEVEL: &str = r#"
id: "002-undo"
name: "Undo"
category: "editing"
difficulty: beginner
profile: both
description: "Undo the last edit."
expected_keys:
  macos: ["Cmd", "Z"]
  windows: ["Ctrl", "Z"]
  linux: ["Ctrl", "Z"]
hints:
  - "Same modifier as Save."
tips: "Add Shift to redo."
"#;

pub const PALETTE_LEVEL: &str = r#"
id: "101-command-palette"
name: "Command Palette"
category: "navigation"
difficulty: intermediate
profile: vscode
description: "Open the command palette."
expected_keys:
  macos: ["Cmd", "Shift", "P"]
  windows: ["Ctrl", "Shift", "P"]
  linux: ["Ctrl", "Shift", "P"]
tips: "F1 works too."
"#;

pub const DELETE_LINE_LEVEL: &str = r#"
id: "301-delete-line"
name: "Delete Line"
category: "vim-editing"
difficulty: beginner
profile: vim
description: "Delete the current line."
expected_keys:
  macos: ["D", "D"]
  windows: ["D", "D"]
  linux: ["D", "D"]
hints:
  - "Press the delete operator twice."
tips: "3dd deletes three lines."
"#;

/// Isolated levels, data and config directories.
pub struct TestEnv {
    pub root: TempDir,
    pub levels_dir: PathBuf,
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl TestEnv {
    /// Environment with no level files.
    pub fn empty() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let levels_dir = root.path().join("levels");
        let data_dir = root.path().join("data");
        let config_dir = root.path().join("config");
        fs::create_dir_all(&levels_dir).expect("Failed to create levels dir");

        Self {
            root,
            levels_dir,
            data_dir,
            config_dir,
        }
    }

    /// Environment with two VS Code levels, one shared level and one Vim level.
    pub fn new() -> Self {
        let env = Self::empty();
        env.write_level("beginner", "001-save-file.yaml", SAVE_LEVEL);
        env.write_level("beginner", "002-undo.yaml", UNDO_LEVEL);
        env.write_level("intermediate", "101-command-palette.yaml", PALETTE_LEVEL);
        env.write_level("vim", "301-delete-line.yaml", DELETE_LINE_LEVEL);
        env
    }

    /// Writes a level file into a difficulty subdirectory.
    pub fn write_level(&self, dir: &str, file: &str, content: &str) -> PathBuf {
        let dir_path = self.levels_dir.join(dir);
        fs::create_dir_all(&dir_path).expect("Failed to create level dir");
        let path = dir_path.join(file);
        fs::write(&path, content).expect("Failed to write level file");
        path
    }

    /// Command with isolated directories, Linux shortcuts and no colors.
    ///
    /// Global options go before the subcommand.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(keyforge_bin());
        cmd.env("KEYFORGE_CONFIG_DIR", &self.config_dir)
            .env("KEYFORGE_PLATFORM", "linux")
            .env("NO_COLOR", "1")
            .env_remove("KEYFORGE_LOG")
            .arg("--levels-dir")
            .arg(&self.levels_dir)
            .arg("--data-dir")
            .arg(&self.data_dir)
            .args(args);
        cmd
    }

    /// Runs a command and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs a command with `input` on stdin.
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn command");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for command")
    }

    /// Parsed progress.json.
    pub fn progress(&self) -> serde_json::Value {
        read_json(&self.data_dir.join("progress.json"))
    }

    /// Parsed stats.json.
    pub fn stats(&self) -> serde_json::Value {
        read_json(&self.data_dir.join("stats.json"))
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read JSON file");
    serde_json::from_str(&content).expect("Failed to parse JSON file")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parses stdout as JSON.
pub fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout(output)).expect("Should parse JSON output")
}
