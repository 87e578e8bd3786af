//! Core training engine: answer verification, chord capture and the
//! session that ties levels, scoring and persistence together.

pub mod capture;
pub mod game;
pub mod verifier;

pub use capture::{capture_chord, CaptureState, ChordCapture, KeySource, TerminalKeySource};
pub use game::{
    AnswerResult, Game, GameError, GameState, HintResult, PlayResult, SubmitResult, BASE_SCORE,
    HINT_PENALTY,
};
pub use verifier::{Verifier, VerifyError, VerifyOutcome};
