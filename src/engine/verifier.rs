//! Checks a submitted key sequence against the active level.

use super::capture::{capture_chord, KeySource};
use crate::keys::{parse_key_input, sequences_match, KeySequence};
use crate::models::{Level, Platform};
use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Errors raised while verifying a submission.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// No level has been selected yet
    #[error("No level is currently active")]
    NoActiveLevel,

    /// The input stream or keyboard device failed, or was closed
    #[error("Failed to read input: {0}")]
    InputRead(#[from] io::Error),
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Whether the submission matched
    pub correct: bool,
    /// Expected sequence for the session platform
    pub expected: KeySequence,
    /// What the user entered
    pub actual: KeySequence,
    /// Time from the start of input collection to a complete sequence
    pub response_time: Duration,
}

/// Verifies submissions for one session.
///
/// The platform is fixed at construction; the active level is replaced
/// wholesale whenever a new level starts.
#[derive(Debug, Clone)]
pub struct Verifier {
    platform: Platform,
    level: Option<Arc<Level>>,
}

impl Verifier {
    /// Creates a verifier for `platform` with no active level.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            level: None,
        }
    }

    /// Platform whose variant is expected.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Makes `level` the active level.
    pub fn set_level(&mut self, level: Arc<Level>) {
        self.level = Some(level);
    }

    /// Drops the active level.
    pub fn clear_level(&mut self) {
        self.level = None;
    }

    /// The active level, if any.
    #[must_use]
    pub fn level(&self) -> Option<&Arc<Level>> {
        self.level.as_ref()
    }

    /// Expected sequence of the active level for this platform.
    pub fn expected_keys(&self) -> Result<&KeySequence, VerifyError> {
        self.level
            .as_ref()
            .map(|level| level.expected_keys.for_platform(self.platform))
            .ok_or(VerifyError::NoActiveLevel)
    }

    /// Compares `actual` with the expected sequence. `started` marks when
    /// input collection began.
    pub fn verify(
        &self,
        actual: KeySequence,
        started: Instant,
    ) -> Result<VerifyOutcome, VerifyError> {
        let expected = self.expected_keys()?.clone();
        let correct = sequences_match(&expected, &actual);
        let response_time = started.elapsed();

        debug!(
            "Verified '{}' against '{}' on {}: {}",
            actual,
            expected,
            self.platform,
            if correct { "correct" } else { "wrong" }
        );

        Ok(VerifyOutcome {
            correct,
            expected,
            actual,
            response_time,
        })
    }

    /// Parses and verifies a text answer such as `Cmd+S` or `:wq`.
    pub fn verify_text(&self, answer: &str) -> Result<VerifyOutcome, VerifyError> {
        let started = Instant::now();
        self.verify(parse_key_input(answer), started)
    }

    /// Reads one line from `reader` and verifies it.
    ///
    /// A closed stream is reported as [`VerifyError::InputRead`].
    pub fn read_and_verify<R: BufRead + ?Sized>(
        &self,
        reader: &mut R,
    ) -> Result<VerifyOutcome, VerifyError> {
        // Fail before blocking on input
        self.expected_keys()?;

        let started = Instant::now();
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(VerifyError::InputRead(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            )));
        }

        self.verify(parse_key_input(line.trim()), started)
    }

    /// Captures one chord from `source` and verifies it.
    pub fn capture_and_verify<S: KeySource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<VerifyOutcome, VerifyError> {
        self.expected_keys()?;

        let started = Instant::now();
        let chord = capture_chord(source)?;
        self.verify(chord, started)
    }
}
