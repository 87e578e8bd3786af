//! End-to-end tests for `keyforge config` and config file precedence.

use std::fs;

mod fixtures;
use fixtures::*;

#[test]
fn test_config_show_default() {
    let env = TestEnv::new();

    let output = env.run(&["config", "show"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        stderr(&output)
    );

    let text = stdout(&output);
    assert!(text.contains("KeyForge Configuration"));
    assert!(text.contains("Profile:    vscode"));
}

#[test]
fn test_config_show_json_format() {
    let env = TestEnv::new();

    let result = json_stdout(&env.run(&["config", "show", "--json"]));
    assert!(result["paths"].is_object(), "Should have paths object");
    assert_eq!(result["game"]["profile"], "vscode");
    assert_eq!(result["game"]["input_mode"], "line");
    assert_eq!(result["ui"]["color"], true);
}

#[test]
fn test_config_path_uses_override_dir() {
    let env = TestEnv::new();

    let text = stdout(&env.run(&["config", "path"]));
    assert!(text.trim().ends_with("config.toml"));
    assert!(text.contains(env.config_dir.to_str().unwrap()));
}

#[test]
fn test_config_set_and_show() {
    let env = TestEnv::new();

    let output = env.run(&[
        "config",
        "set",
        "--default-profile",
        "vim",
        "--input-mode",
        "capture",
        "--color",
        "false",
    ]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        stderr(&output)
    );
    assert!(env.config_dir.join("config.toml").exists());

    let result = json_stdout(&env.run(&["config", "show", "--json"]));
    assert_eq!(result["game"]["profile"], "vim");
    assert_eq!(result["game"]["input_mode"], "capture");
    assert_eq!(result["ui"]["color"], false);
}

#[test]
fn test_configured_profile_applies_without_flag() {
    let env = TestEnv::new();
    env.run(&["config", "set", "--default-profile", "vim"]);

    let levels = json_stdout(&env.run(&["levels", "--json"]));
    assert_eq!(levels["profile"], "vim");

    // The flag still wins
    let levels = json_stdout(&env.run(&["--profile", "vscode", "levels", "--json"]));
    assert_eq!(levels["profile"], "vscode");
}

#[test]
fn test_config_set_requires_option() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("At least one configuration option"));
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let env = TestEnv::new();

    let profile = env.run(&["config", "set", "--default-profile", "emacs"]);
    assert_eq!(profile.status.code(), Some(2));

    let levels = env.run(&["config", "set", "--levels-path", "/definitely/not/here"]);
    assert_eq!(levels.status.code(), Some(2));
    assert!(!env.config_dir.join("config.toml").exists());
}

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.config_dir).unwrap();
    fs::write(env.config_dir.join("config.toml"), "[game\nprofile = ").unwrap();

    let output = env.run(&["levels"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load configuration"));
}
