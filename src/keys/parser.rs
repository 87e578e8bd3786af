//! Free-form answer text to key sequence.

use super::normalize::normalize_key_name;
use super::KeySequence;

/// Multi-character Vim commands that are typed as plain strokes.
const STROKE_COMMANDS: [&str; 8] = ["dd", "yy", "pp", "gg", "dw", "cw", "ci", "di"];

/// Parses a user answer into a normalized key sequence.
///
/// Delimiters are tried in priority order: `+`, then `-`, then whitespace.
/// Without a delimiter, `:`-prefixed input and known stroke commands are split
/// into one token per character; anything else is a single key.
///
/// Supported forms include `Cmd+S`, `Ctrl+Shift+P`, `Cmd-S`, `Ctrl S`, `Esc`,
/// `:wq` and `dd`.
#[must_use]
pub fn parse_key_input(input: &str) -> KeySequence {
    let input = input.trim();
    if input.is_empty() {
        return KeySequence::default();
    }

    let pieces: Vec<&str> = if input.contains('+') {
        input.split('+').collect()
    } else if input.contains('-') {
        input.split('-').collect()
    } else if input.contains(' ') {
        input.split_whitespace().collect()
    } else if input.starts_with(':') || is_stroke_command(input) {
        return input
            .chars()
            .map(|ch| ch.to_uppercase().collect::<String>())
            .collect();
    } else {
        vec![input]
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(normalize_key_name)
        .collect()
}

fn is_stroke_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    STROKE_COMMANDS.contains(&lower.as_str())
}
