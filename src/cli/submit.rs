//! Submit command: checks an answer given on the command line.

use crate::cli::common::{CliError, CliResult, GlobalArgs};
use crate::engine::SubmitResult;
use crate::ui;
use clap::Args;
use serde::Serialize;

/// Submit an answer for the current level
#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    /// Shortcut to submit, e.g. `Ctrl+S`, `Cmd Shift P` or `:wq`.
    /// Several arguments are joined with `+`.
    #[arg(value_name = "KEYS", required = true, num_args = 1..)]
    pub keys: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with code 3 when the answer is wrong
    #[arg(long)]
    pub strict: bool,
}

/// JSON-serializable submission result
#[derive(Serialize, Debug)]
struct SubmitOutput {
    level_id: String,
    correct: bool,
    expected: String,
    actual: String,
    score: u32,
    hints_used: u32,
    response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_level: Option<String>,
    game_completed: bool,
}

impl SubmitOutput {
    fn new(level_id: &str, result: &SubmitResult) -> Self {
        Self {
            level_id: level_id.to_string(),
            correct: result.correct,
            expected: result.expected.format(),
            actual: result.actual.format(),
            score: result.score,
            hints_used: result.hints_used,
            response_time_ms: u64::try_from(result.response_time.as_millis())
                .unwrap_or(u64::MAX),
            next_level: result.next_level.as_ref().map(|level| level.id.clone()),
            game_completed: result.game_completed,
        }
    }
}

impl SubmitArgs {
    /// The answer text: all arguments joined with `+`.
    #[must_use]
    pub fn answer(&self) -> String {
        self.keys.join("+")
    }

    /// Execute the submit command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut game = global.open_game()?;
        let level = game.play()?.level;

        let result = game.submit_text(&self.answer())?;

        if self.json {
            let output = SubmitOutput::new(&level.id, &result);
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print!("{}", ui::render_result(&result));
        }

        if self.strict && !result.correct {
            return Err(CliError::wrong_answer("Incorrect answer"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_joins_arguments() {
        let args = SubmitArgs {
            keys: vec!["Ctrl".to_string(), "Shift".to_string(), "P".to_string()],
            json: false,
            strict: false,
        };
        assert_eq!(args.answer(), "Ctrl+Shift+P");

        let args = SubmitArgs {
            keys: vec![":wq".to_string()],
            json: false,
            strict: false,
        };
        assert_eq!(args.answer(), ":wq");
    }
}
