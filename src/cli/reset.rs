//! Reset command.

use crate::cli::common::{CliError, CliResult, GlobalArgs};
use crate::ui;
use clap::Args;
use std::io::{self, BufRead, Write};

/// Reset training progress
#[derive(Debug, Clone, Args)]
pub struct ResetArgs {
    /// Also clear attempt statistics
    #[arg(long)]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// True for `y` or `yes`, in any case.
fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn confirm(prompt: &str) -> CliResult<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout()
        .flush()
        .map_err(|e| CliError::io(format!("Failed to write to terminal: {e}")))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| CliError::io(format!("Failed to read confirmation: {e}")))?;

    Ok(is_confirmation(&answer))
}

impl ResetArgs {
    /// Execute the reset command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut game = global.open_game()?;

        let prompt = if self.all {
            "Reset all progress and statistics? This clears every training record."
        } else {
            "Reset progress? Statistics are kept."
        };
        if !self.yes && !confirm(prompt)? {
            print!("{}", ui::render_info("Cancelled"));
            return Ok(());
        }

        if self.all {
            game.reset_all()?;
        } else {
            game.reset()?;
        }

        print!("{}", ui::render_reset(self.all));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_answers() {
        assert!(is_confirmation("y\n"));
        assert!(is_confirmation("Y"));
        assert!(is_confirmation(" yes "));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("yep"));
    }
}
