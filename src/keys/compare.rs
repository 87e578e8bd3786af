//! Equality of key sequences.
//!
//! Chords compare with modifier order ignored but the main key pinned to the
//! last position. Stroke sequences (Vim-style `dd`, `:wq`) compare in order.

use super::{KeySequence, SequenceKind};

/// Returns true if `actual` denotes the same shortcut as `expected`.
#[must_use]
pub fn sequences_match(expected: &KeySequence, actual: &KeySequence) -> bool {
    comparison_form(expected) == comparison_form(actual)
}

/// Lower-cased, trimmed tokens with chord modifiers sorted.
fn comparison_form(sequence: &KeySequence) -> Vec<String> {
    let mut tokens: Vec<String> = sequence
        .iter()
        .map(|token| token.trim().to_lowercase())
        .collect();

    if tokens.len() > 1 && classify(&tokens) == SequenceKind::Chord {
        let main = tokens.len() - 1;
        tokens[..main].sort();
    }

    tokens
}

/// Classifies lower-cased tokens: a leading `:` or single letter marks strokes.
pub(super) fn classify<S: AsRef<str>>(tokens: &[S]) -> SequenceKind {
    let Some(first) = tokens.first() else {
        return SequenceKind::Chord;
    };
    let first = first.as_ref();
    let mut chars = first.chars();
    let single_letter = matches!((chars.next(), chars.next()), (Some('a'..='z'), None));

    if first == ":" || single_letter {
        SequenceKind::Strokes
    } else {
        SequenceKind::Chord
    }
}
