//! Key sequences: parsing, normalization, comparison and display.
//!
//! A [`KeySequence`] is what a level expects and what a user submits. It is
//! either a chord (modifiers plus one main key, e.g. `Ctrl+Shift+P`) or a
//! stroke sequence (plain keys typed in order, e.g. Vim's `dd` or `:wq`).

pub mod compare;
pub mod normalize;
pub mod parser;

pub use compare::sequences_match;
pub use normalize::{is_modifier, normalize_key_name, MODIFIER_ORDER};
pub use parser::parse_key_input;

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the tokens of a sequence are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Modifiers held together with one main key; modifier order is irrelevant
    Chord,
    /// Keys pressed one after another; order matters
    Strokes,
}

/// An ordered list of canonical key tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySequence(Vec<String>);

impl KeySequence {
    /// Creates a sequence from already-canonical tokens.
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Borrows the tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Copy with every token in canonical spelling.
    #[must_use]
    pub fn normalized(&self) -> Self {
        self.0.iter().map(|token| normalize_key_name(token)).collect()
    }

    /// Consumes the sequence, returning its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }

    /// Chord or stroke sequence, judged from the first token.
    #[must_use]
    pub fn kind(&self) -> SequenceKind {
        let lowered: Vec<String> = self.0.iter().map(|t| t.trim().to_lowercase()).collect();
        compare::classify(&lowered)
    }

    /// Display form: `Cmd+S` for chords, `:wq` / `dd` for stroke sequences.
    #[must_use]
    pub fn format(&self) -> String {
        match self.kind() {
            SequenceKind::Chord => self.0.join("+"),
            SequenceKind::Strokes => self.0.concat().to_lowercase(),
        }
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<Vec<String>> for KeySequence {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl From<&[&str]> for KeySequence {
    fn from(tokens: &[&str]) -> Self {
        Self(tokens.iter().map(|t| (*t).to_string()).collect())
    }
}

impl FromIterator<String> for KeySequence {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeySequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
