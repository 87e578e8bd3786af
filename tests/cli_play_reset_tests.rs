//! End-to-end tests for `keyforge play` and `keyforge reset`.

mod fixtures;
use fixtures::*;

#[test]
fn test_play_reads_answer_from_stdin() {
    let env = TestEnv::new();

    let output = env.run_with_stdin(&["play"], "ctrl s\n");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        stderr(&output)
    );

    let text = stdout(&output);
    assert!(text.contains("Level 001-save-file: Save File"));
    assert!(text.contains("Save the current file."));
    assert!(text.contains("Type the shortcut and press Enter"));
    assert!(text.contains("✓ Correct!"));
    assert_eq!(env.progress()["current_level_id"], "002-undo");
}

#[test]
fn test_play_resumes_current_level() {
    let env = TestEnv::new();
    env.run(&["submit", "Ctrl+S"]);

    let text = stdout(&env.run_with_stdin(&["play"], "Ctrl+Y\n"));
    assert!(text.contains("Level 002-undo: Undo"));
    assert!(text.contains("✗ Incorrect"));
    assert!(text.contains("You entered: Ctrl+Y"));
    assert!(text.contains("Submit:  keyforge submit Ctrl+S"));
}

#[test]
fn test_play_capture_types_stroke_levels() {
    let env = TestEnv::new();
    env.run(&["--profile", "vim", "submit", "Ctrl+Z"]);

    // Stdin is not a terminal, so this only passes without raw capture
    let output = env.run_with_stdin(&["--profile", "vim", "play", "--capture"], "dd\n");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        stderr(&output)
    );

    let text = stdout(&output);
    assert!(text.contains("Level 301-delete-line: Delete Line"));
    assert!(text.contains("type it instead of pressing it"));
    assert!(text.contains("Type the shortcut and press Enter"));
    assert!(text.contains("✓ Correct!"));
    assert!(env.progress()["completed_levels"]["301-delete-line"].is_object());
}

#[test]
fn test_play_with_closed_input() {
    let env = TestEnv::new();

    let output = env.run_with_stdin(&["play"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read input"));
}

#[test]
fn test_play_capture_needs_terminal() {
    let env = TestEnv::new();

    let output = env.run_with_stdin(&["play", "--capture"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("interactive terminal"));
}

#[test]
fn test_reset_keeps_stats() {
    let env = TestEnv::new();
    env.run(&["submit", "Ctrl+S"]);

    let output = env.run(&["reset", "--yes"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Progress reset"));

    let progress = env.progress();
    assert_eq!(progress["current_level_id"], "");
    assert!(progress["completed_levels"].as_object().unwrap().is_empty());
    assert_eq!(env.stats()["level_stats"]["001-save-file"]["total_attempts"], 1);
}

#[test]
fn test_reset_all_clears_stats() {
    let env = TestEnv::new();
    env.run(&["submit", "Ctrl+S"]);

    let output = env.run(&["reset", "--all", "--yes"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Progress and statistics reset"));
    assert!(env.stats()["level_stats"].as_object().unwrap().is_empty());
}

#[test]
fn test_reset_asks_for_confirmation() {
    let env = TestEnv::new();
    env.run(&["submit", "Ctrl+S"]);

    let declined = env.run_with_stdin(&["reset", "--all"], "n\n");
    assert_eq!(declined.status.code(), Some(0));
    assert!(stdout(&declined).contains("[y/N]"));
    assert!(stdout(&declined).contains("Cancelled"));
    assert_eq!(env.progress()["current_level_id"], "002-undo");

    let accepted = env.run_with_stdin(&["reset", "--all"], "y\n");
    assert_eq!(accepted.status.code(), Some(0));
    assert_eq!(env.progress()["current_level_id"], "");
}
