//! Answer command.

use crate::cli::common::{CliError, CliResult, GlobalArgs};
use crate::ui;
use clap::Args;
use serde::Serialize;

/// Show the answer for the current level (costs the hint points)
#[derive(Debug, Clone, Args)]
pub struct AnswerArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct AnswerOutput {
    level_id: String,
    answer: String,
    tips: String,
}

impl AnswerArgs {
    /// Execute the answer command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut game = global.open_game()?;
        let level = game.play()?.level;
        let answer = game.answer()?;

        if self.json {
            let output = AnswerOutput {
                level_id: level.id.clone(),
                answer: answer.answer,
                tips: answer.tips,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print!("{}", ui::render_answer(&answer));
        }

        Ok(())
    }
}
