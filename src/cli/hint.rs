//! Hint command.

use crate::cli::common::{CliError, CliResult, GlobalArgs};
use crate::ui;
use clap::Args;
use serde::Serialize;

/// Reveal the next hint for the current level
#[derive(Debug, Clone, Args)]
pub struct HintArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct HintOutput {
    level_id: String,
    hint: Option<String>,
    shown: u32,
    total: usize,
    exhausted: bool,
}

impl HintArgs {
    /// Execute the hint command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut game = global.open_game()?;
        let level = game.play()?.level;
        let hint = game.hint()?;

        if self.json {
            let output = HintOutput {
                level_id: level.id.clone(),
                hint: hint.hint,
                shown: hint.shown,
                total: hint.total,
                exhausted: hint.exhausted,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print!("{}", ui::render_hint(&hint));
        }

        Ok(())
    }
}
