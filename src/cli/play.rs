//! Play command: shows the current level and reads one answer.

use crate::cli::common::{CliError, CliResult, GlobalArgs};
use crate::config::InputMode;
use crate::engine::{Game, SubmitResult, TerminalKeySource};
use crate::ui;
use clap::Args;
use std::io::{self, IsTerminal, Write};

/// Start or continue training
#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    /// Press the shortcut instead of typing it
    #[arg(long)]
    pub capture: bool,
}

impl PlayArgs {
    /// Execute the play command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let session = global.session()?;
        let requested = if self.capture {
            InputMode::Capture
        } else {
            session.config.game.input_mode
        };

        let mut game = session.open_game()?;
        let started = game.play()?;
        let mode = effective_mode(requested, game.expects_strokes()?);

        print!("{}", ui::render_level(&started.level));
        if started.hints_used > 0 {
            println!("({} hint(s) already revealed)", started.hints_used);
        }
        if mode != requested {
            print!(
                "{}",
                ui::render_info("This level is a key sequence, so type it instead of pressing it.")
            );
        }
        print!("{}", ui::render_prompt(game.platform(), mode));
        io::stdout()
            .flush()
            .map_err(|e| CliError::io(format!("Failed to write to terminal: {e}")))?;

        let result = match mode {
            InputMode::Line => {
                let stdin = io::stdin();
                game.submit_line(&mut stdin.lock())?
            }
            InputMode::Capture => submit_captured(&mut game)?,
        };

        print!("{}", ui::render_result(&result));
        if !result.correct {
            print!("{}", ui::render_play_help(game.platform()));
        }
        Ok(())
    }
}

/// Chord capture records one chord, so stroke-sequence levels are typed.
fn effective_mode(requested: InputMode, expects_strokes: bool) -> InputMode {
    if expects_strokes {
        InputMode::Line
    } else {
        requested
    }
}

fn submit_captured(game: &mut Game) -> CliResult<SubmitResult> {
    if !io::stdin().is_terminal() {
        return Err(CliError::validation(
            "Capture mode needs an interactive terminal; type the answer instead",
        ));
    }

    let mut keys = TerminalKeySource::new()
        .map_err(|e| CliError::io(format!("Failed to enable raw mode: {e}")))?;
    let result = game.submit_captured(&mut keys);
    // Restore the terminal before printing anything
    drop(keys);

    Ok(result?)
}
