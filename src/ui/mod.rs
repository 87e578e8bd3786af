//! Terminal rendering.
//!
//! Every function returns the text to print; nothing here touches stdout.
//! Colors come from crossterm's [`Stylize`] and are dropped automatically when
//! color output is disabled.

use crate::config::InputMode;
use crate::engine::{AnswerResult, HintResult, SubmitResult};
use crate::models::{Level, Platform};
use crate::storage::{GlobalStats, ProgressStore};
use crossterm::style::Stylize;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

const SEPARATOR: &str = "------------------------------------------------------------";

/// Width of the progress bar in `render_stats`.
pub const PROGRESS_BAR_WIDTH: usize = 30;

/// Formats a response time as seconds with millisecond precision.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

/// Renders `[█████░░░░░]` for `percentage` (clamped to 0..=100).
#[must_use]
pub fn render_progress_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((ratio * width as f64).floor() as usize).min(width);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Level header, description and scenario.
#[must_use]
pub fn render_level(level: &Level) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        format!("Level {}: {}", level.id, level.name).bold()
    );
    let _ = writeln!(
        out,
        "{}",
        format!(
            "  Difficulty: {} | Category: {}",
            level.difficulty.label(),
            level.category
        )
        .dark_grey()
    );
    let _ = writeln!(out);

    if !level.description.is_empty() {
        let _ = writeln!(out, "{}", level.description.trim_end());
    }
    if !level.scenario.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", level.scenario.trim_end().italic());
    }
    out
}

/// Input instructions shown before reading an answer.
#[must_use]
pub fn render_prompt(platform: Platform, mode: InputMode) -> String {
    let modifier = match platform {
        Platform::MacOs => "Cmd",
        Platform::Windows | Platform::Linux => "Ctrl",
    };

    let mut out = String::new();
    let _ = writeln!(out);
    match mode {
        InputMode::Line => {
            let _ = writeln!(out, "{}", "Type the shortcut and press Enter:".cyan().bold());
            let _ = writeln!(
                out,
                "{}",
                format!("  (e.g. {modifier}+S, Ctrl+Shift+P, Esc, :wq)").dark_grey()
            );
        }
        InputMode::Capture => {
            let _ = writeln!(out, "{}", "Press the shortcut now:".cyan().bold());
            let _ = writeln!(
                out,
                "{}",
                "  (hold the modifiers, then press the key)".dark_grey()
            );
        }
    }
    out
}

/// How to answer a level from the command line.
#[must_use]
pub fn render_play_help(platform: Platform) -> String {
    let example = match platform {
        Platform::MacOs => "keyforge submit Cmd+S",
        Platform::Windows | Platform::Linux => "keyforge submit Ctrl+S",
    };

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "  Submit:  {example}");
    let _ = writeln!(out, "  Hint:    keyforge hint");
    let _ = writeln!(out, "  Answer:  keyforge answer");
    out
}

/// Outcome of a submission.
#[must_use]
pub fn render_result(result: &SubmitResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out);

    if result.correct {
        let _ = writeln!(out, "{}", "✓ Correct!".green().bold());
        let _ = writeln!(out, "  Response time: {}", format_duration(result.response_time));
        let _ = writeln!(out, "  Score:         {}", result.score);
        if result.hints_used > 0 {
            let _ = writeln!(
                out,
                "{}",
                format!("  ({} hint(s) used)", result.hints_used).dark_grey()
            );
        }

        if result.game_completed {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", "All levels completed!".green().bold());
        } else if let Some(next) = &result.next_level {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}",
                format!("  Next level: {} - {}", next.id, next.name).cyan()
            );
            let _ = writeln!(out, "{}", "  Run 'keyforge play' to continue".dark_grey());
        }
    } else {
        let _ = writeln!(out, "{}", "✗ Incorrect".red().bold());
        let actual = if result.actual.is_empty() {
            "(nothing)".to_string()
        } else {
            result.actual.format()
        };
        let _ = writeln!(out, "  You entered: {actual}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "  Run 'keyforge hint' for a hint".yellow());
        let _ = writeln!(out, "{}", "  Run 'keyforge play' to try again".yellow());
    }
    out
}

/// A revealed hint, or a note that none are left.
#[must_use]
pub fn render_hint(hint: &HintResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    match &hint.hint {
        Some(text) => {
            let _ = writeln!(out, "Hint ({}/{}):", hint.shown, hint.total);
            let _ = writeln!(out, "{}", format!("  {text}").yellow());
        }
        None if hint.total == 0 => {
            let _ = writeln!(out, "This level has no hints.");
            let _ = writeln!(out, "{}", "  Run 'keyforge answer' to see the answer".dark_grey());
        }
        None => {
            let _ = writeln!(out, "All {} hints have been shown.", hint.total);
            let _ = writeln!(out, "{}", "  Run 'keyforge answer' to see the answer".dark_grey());
        }
    }
    out
}

/// The answer and its explanation.
#[must_use]
pub fn render_answer(answer: &AnswerResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Answer: {}", answer.answer.as_str().cyan().bold());
    if !answer.tips.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", answer.tips.trim_end().yellow());
    }
    out
}

/// Levels grouped by difficulty with their completion state.
///
/// `✓` completed, `▶` current, `·` open.
#[must_use]
pub fn render_level_list(levels: &[Arc<Level>], progress: &ProgressStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Levels".bold());

    let current = match progress.current_level_id() {
        "" => levels.first().map_or("", |level| level.id.as_str()),
        id => id,
    };
    let mut difficulty = None;

    for level in levels {
        if difficulty != Some(level.difficulty) {
            difficulty = Some(level.difficulty);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", format!("  == {} ==", level.difficulty.label()).cyan());
        }

        let line = format!("{}: {}", level.id, level.name);
        if progress.is_completed(&level.id) {
            let _ = writeln!(out, "  {}", format!("✓ {line}").green());
        } else if level.id == current {
            let _ = writeln!(out, "  {}", format!("▶ {line}").yellow().bold());
        } else {
            let _ = writeln!(out, "  · {line}");
        }
    }
    out
}

/// Overall progress and attempt statistics.
#[must_use]
///
/// `completed` and `total_levels` cover the session profile only; the total
/// score spans every profile.
pub fn render_stats(
    progress: &ProgressStore,
    stats: &GlobalStats,
    completed: usize,
    total_levels: usize,
    weak_levels: &[String],
) -> String {
    #[allow(clippy::cast_precision_loss)]
    let percentage = if total_levels > 0 {
        completed as f64 / total_levels as f64 * 100.0
    } else {
        0.0
    };

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Training Statistics".bold());
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(
        out,
        "  Progress:     {completed}/{total_levels} ({percentage:.1}%)"
    );
    let _ = writeln!(out, "  Total score:  {}", progress.total_score());
    let _ = writeln!(
        out,
        "  {}",
        render_progress_bar(percentage, PROGRESS_BAR_WIDTH).green()
    );

    if stats.total_attempts > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "[ATTEMPTS]".cyan());
        let _ = writeln!(out, "  Total attempts:     {}", stats.total_attempts);
        let _ = writeln!(out, "  Accuracy:           {:.1}%", stats.accuracy * 100.0);
        let _ = writeln!(
            out,
            "  Avg response time:  {}",
            format_duration(Duration::from_millis(stats.average_response_time_ms))
        );
        let _ = writeln!(out, "  Hints used:         {}", stats.total_hints_used);
    } else {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "  No attempts yet. Run 'keyforge play' to start.".dark_grey());
    }

    if !weak_levels.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "[NEEDS PRACTICE]".yellow());
        for id in weak_levels {
            let _ = writeln!(out, "  {id}");
        }
    }
    let _ = writeln!(out, "{SEPARATOR}");
    out
}

/// Confirmation after a reset.
#[must_use]
pub fn render_reset(include_stats: bool) -> String {
    let what = if include_stats {
        "Progress and statistics reset"
    } else {
        "Progress reset"
    };
    format!(
        "\n{}\n{}\n",
        format!("✓ {what}").green(),
        "  Run 'keyforge play' to start over".dark_grey()
    )
}

/// Informational message.
#[must_use]
pub fn render_info(message: &str) -> String {
    format!("\n{}\n", message.cyan())
}

/// Error message.
#[must_use]
pub fn render_error(message: &str) -> String {
    format!("{}", format!("✗ Error: {message}").red())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeySequence;
    use crate::models::{Difficulty, KeymapProfile, PlatformKeys};
    use tempfile::TempDir;

    fn disable_color() {
        crossterm::style::force_color_output(false);
    }

    fn level(id: &str, difficulty: Difficulty) -> Arc<Level> {
        Arc::new(Level {
            id: id.to_string(),
            name: format!("Name {id}"),
            category: "file".to_string(),
            difficulty,
            profile: KeymapProfile::Vscode,
            description: "Save the file".to_string(),
            scenario: String::new(),
            expected_keys: PlatformKeys::default(),
            hints: vec![],
            tips: String::new(),
            prerequisites: vec![],
            tags: vec![],
        })
    }

    fn result(correct: bool) -> SubmitResult {
        SubmitResult {
            correct,
            expected: KeySequence::from(&["Ctrl", "S"][..]),
            actual: KeySequence::from(&["Ctrl", "Z"][..]),
            response_time: Duration::from_millis(1234),
            hints_used: 1,
            score: if correct { 80 } else { 0 },
            next_level: Some(level("002", Difficulty::Beginner)),
            game_completed: false,
        }
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(render_progress_bar(0.0, 4), "[░░░░]");
        assert_eq!(render_progress_bar(50.0, 4), "[██░░]");
        assert_eq!(render_progress_bar(100.0, 4), "[████]");
        assert_eq!(render_progress_bar(250.0, 4), "[████]");
        assert_eq!(render_progress_bar(-5.0, 4), "[░░░░]");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1234)), "1.23s");
        assert_eq!(format_duration(Duration::ZERO), "0.00s");
    }

    #[test]
    fn test_render_result_correct() {
        disable_color();
        let text = render_result(&result(true));
        assert!(text.contains("✓ Correct!"));
        assert!(text.contains("Score:         80"));
        assert!(text.contains("1 hint(s) used"));
        assert!(text.contains("Next level: 002 - Name 002"));
    }

    #[test]
    fn test_render_result_incorrect_shows_actual() {
        disable_color();
        let text = render_result(&result(false));
        assert!(text.contains("✗ Incorrect"));
        assert!(text.contains("You entered: Ctrl+Z"));
        assert!(!text.contains("Ctrl+S"));
    }

    #[test]
    fn test_render_hint_states() {
        disable_color();
        let shown = render_hint(&HintResult {
            hint: Some("Think file".to_string()),
            shown: 1,
            total: 2,
            exhausted: false,
        });
        assert!(shown.contains("Hint (1/2):"));
        assert!(shown.contains("Think file"));

        let exhausted = render_hint(&HintResult {
            hint: None,
            shown: 2,
            total: 2,
            exhausted: true,
        });
        assert!(exhausted.contains("All 2 hints have been shown"));
    }

    #[test]
    fn test_render_level_list_marks() {
        disable_color();
        let temp = TempDir::new().unwrap();
        let mut progress = ProgressStore::open(temp.path());
        progress
            .mark_completed("001", 100, Duration::from_millis(10))
            .unwrap();
        progress.set_current_level("002").unwrap();

        let levels = vec![
            level("001", Difficulty::Beginner),
            level("002", Difficulty::Beginner),
            level("003", Difficulty::Intermediate),
        ];
        let text = render_level_list(&levels, &progress);

        assert!(text.contains("== Beginner =="));
        assert!(text.contains("== Intermediate =="));
        assert!(text.contains("✓ 001: Name 001"));
        assert!(text.contains("▶ 002: Name 002"));
        assert!(text.contains("· 003: Name 003"));
    }

    #[test]
    fn test_render_stats() {
        disable_color();
        let temp = TempDir::new().unwrap();
        let progress = ProgressStore::open(temp.path());
        let stats = GlobalStats {
            total_attempts: 4,
            total_correct: 3,
            levels_attempted: 2,
            total_hints_used: 1,
            average_response_time_ms: 1500,
            accuracy: 0.75,
        };

        let text = render_stats(&progress, &stats, 0, 10, &["007".to_string()]);
        assert!(text.contains("Progress:     0/10 (0.0%)"));
        assert!(text.contains("Accuracy:           75.0%"));
        assert!(text.contains("Avg response time:  1.50s"));
        assert!(text.contains("[NEEDS PRACTICE]"));
        assert!(text.contains("007"));

        let partial = render_stats(&progress, &stats, 3, 4, &[]);
        assert!(partial.contains("Progress:     3/4 (75.0%)"));
        assert!(!partial.contains("[NEEDS PRACTICE]"));
    }
}
