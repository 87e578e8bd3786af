//! Training session: level selection, submissions, hints and scoring.

use super::capture::KeySource;
use super::verifier::{Verifier, VerifyError, VerifyOutcome};
use crate::catalog::{CatalogError, LevelCatalog};
use crate::keys::{KeySequence, SequenceKind};
use crate::models::{KeymapProfile, Level, Platform};
use crate::storage::{AttemptRecord, ProgressStore, StatsStore};
use chrono::Utc;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Points for a correct answer without hints.
pub const BASE_SCORE: u32 = 100;

/// Points deducted per revealed hint.
pub const HINT_PENALTY: u32 = 20;

/// Errors raised by session operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// An operation needs a current level but none was started
    #[error("No level is in progress. Run 'play' first.")]
    NoActiveLevel,

    /// The catalog has no level for the session profile
    #[error("No levels available for keymap profile '{0}'")]
    NoLevelsAvailable(KeymapProfile),

    /// Level files could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Reading the answer failed
    #[error(transparent)]
    Verify(VerifyError),

    /// Progress or statistics could not be saved
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<VerifyError> for GameError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::NoActiveLevel => Self::NoActiveLevel,
            other => Self::Verify(other),
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No level started
    Idle,
    /// A level is active and accepts submissions
    Playing,
    /// The last applicable level was completed
    Completed,
}

/// Level chosen by [`Game::play`].
#[derive(Debug, Clone)]
pub struct PlayResult {
    /// The active level
    pub level: Arc<Level>,
    /// True if the player was not on this level before
    pub is_new: bool,
    /// Hints already revealed for this level
    pub hints_used: u32,
}

/// Outcome of a submission after scoring and progress updates.
#[derive(Debug, Clone)]
pub struct SubmitResult {
    /// Whether the answer matched
    pub correct: bool,
    /// Expected sequence for the session platform
    pub expected: KeySequence,
    /// Submitted sequence
    pub actual: KeySequence,
    /// Time taken to answer
    pub response_time: Duration,
    /// Hints revealed before answering
    pub hints_used: u32,
    /// Points awarded (0 when wrong)
    pub score: u32,
    /// Level unlocked by a correct answer
    pub next_level: Option<Arc<Level>>,
    /// True when the last applicable level was completed
    pub game_completed: bool,
}

/// A revealed hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintResult {
    /// Hint text, or `None` when all hints were already shown
    pub hint: Option<String>,
    /// Hints revealed so far
    pub shown: u32,
    /// Hints the level has
    pub total: usize,
    /// True when no hint was left to reveal
    pub exhausted: bool,
}

/// The answer to the current level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    /// Expected sequence, formatted for display
    pub answer: String,
    /// Explanatory tip text
    pub tips: String,
}

/// One training session.
///
/// Owns everything an operation needs (levels, verifier, stores, active
/// level, hint counter); no global state is involved.
#[derive(Debug)]
pub struct Game {
    catalog: LevelCatalog,
    verifier: Verifier,
    progress: ProgressStore,
    stats: StatsStore,
    current_level: Option<Arc<Level>>,
    state: GameState,
    profile: KeymapProfile,
    hints_used: u32,
}

impl Game {
    /// Creates a session over an already loaded catalog, with progress and
    /// statistics kept in `data_dir`.
    #[must_use]
    pub fn new(
        catalog: LevelCatalog,
        data_dir: &Path,
        profile: KeymapProfile,
        platform: Platform,
    ) -> Self {
        Self {
            catalog,
            verifier: Verifier::new(platform),
            progress: ProgressStore::open(data_dir),
            stats: StatsStore::open(data_dir),
            current_level: None,
            state: GameState::Idle,
            profile,
            hints_used: 0,
        }
    }

    /// Loads levels from `levels_dir` and opens a session.
    pub fn open(
        levels_dir: &Path,
        data_dir: &Path,
        profile: KeymapProfile,
        platform: Platform,
    ) -> Result<Self, GameError> {
        let catalog = match LevelCatalog::load(levels_dir) {
            Ok(catalog) => catalog,
            Err(CatalogError::NoLevels(_)) => return Err(GameError::NoLevelsAvailable(profile)),
            Err(e) => return Err(e.into()),
        };
        Ok(Self::new(catalog, data_dir, profile, platform))
    }

    /// Keymap profile of the session.
    #[must_use]
    pub fn profile(&self) -> KeymapProfile {
        self.profile
    }

    /// Platform answers are checked against.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.verifier.platform()
    }

    /// Session state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The active level, if one was started.
    #[must_use]
    pub fn current_level(&self) -> Option<&Arc<Level>> {
        self.current_level.as_ref()
    }

    /// True if the active level expects a stroke sequence (`dd`, `:wq`)
    /// rather than a chord.
    pub fn expects_strokes(&self) -> Result<bool, GameError> {
        Ok(self.verifier.expected_keys()?.kind() == SequenceKind::Strokes)
    }

    /// Starts or resumes play.
    ///
    /// Resumes the stored current level when it exists and fits the profile;
    /// otherwise picks the first applicable level not yet completed, falling
    /// back to the first applicable level.
    pub fn play(&mut self) -> Result<PlayResult, GameError> {
        let stored_id = self.progress.current_level_id().to_string();

        let resumed = Some(stored_id.as_str())
            .filter(|id| !id.is_empty())
            .and_then(|id| self.catalog.get(id))
            .filter(|level| level.profile.applies_to(self.profile));

        let level = match resumed {
            Some(level) => level,
            None => self
                .first_open_level()
                .ok_or(GameError::NoLevelsAvailable(self.profile))?,
        };

        let is_new = stored_id != level.id;
        self.progress.set_current_level(&level.id)?;
        self.progress.set_profile(self.profile.id())?;
        if self.progress.level_started_at().is_none() {
            self.progress.start_level_timer(Utc::now())?;
        }

        self.hints_used = self.progress.hints_used();
        self.verifier.set_level(Arc::clone(&level));
        self.current_level = Some(Arc::clone(&level));
        self.state = GameState::Playing;

        info!("Playing level {} ({})", level.id, self.profile);
        Ok(PlayResult {
            level,
            is_new,
            hints_used: self.hints_used,
        })
    }

    fn first_open_level(&self) -> Option<Arc<Level>> {
        let applicable = self.catalog.all_by_profile(self.profile);
        applicable
            .iter()
            .find(|level| !self.progress.is_completed(&level.id))
            .or_else(|| applicable.first())
            .cloned()
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.state == GameState::Playing && self.current_level.is_some() {
            Ok(())
        } else {
            Err(GameError::NoActiveLevel)
        }
    }

    /// Verifies a text answer such as `Ctrl+Shift+P`.
    ///
    /// The answer arrives in one piece, so the response time runs from the
    /// level start (or the previous attempt) as stored in the progress file.
    pub fn submit_text(&mut self, answer: &str) -> Result<SubmitResult, GameError> {
        self.ensure_playing()?;
        let mut outcome = self.verifier.verify_text(answer)?;
        if let Some(elapsed) = self.time_since_level_start() {
            outcome.response_time = elapsed;
        }
        self.process_outcome(outcome)
    }

    fn time_since_level_start(&self) -> Option<Duration> {
        let started = self.progress.level_started_at()?;
        (Utc::now() - started).to_std().ok()
    }

    /// Reads one answer line from `reader` and verifies it.
    pub fn submit_line<R: BufRead + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<SubmitResult, GameError> {
        self.ensure_playing()?;
        let outcome = self.verifier.read_and_verify(reader)?;
        self.process_outcome(outcome)
    }

    /// Captures one chord from `source` and verifies it.
    pub fn submit_captured<S: KeySource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<SubmitResult, GameError> {
        self.ensure_playing()?;
        let outcome = self.verifier.capture_and_verify(source)?;
        self.process_outcome(outcome)
    }

    fn process_outcome(&mut self, outcome: VerifyOutcome) -> Result<SubmitResult, GameError> {
        let level = self.current_level.clone().ok_or(GameError::NoActiveLevel)?;
        let score = self.calculate_score(outcome.correct);

        self.stats.record_attempt(
            &level.id,
            AttemptRecord {
                correct: outcome.correct,
                response_time: outcome.response_time,
                hints_used: self.hints_used,
            },
        )?;

        let mut result = SubmitResult {
            correct: outcome.correct,
            expected: outcome.expected,
            actual: outcome.actual,
            response_time: outcome.response_time,
            hints_used: self.hints_used,
            score,
            next_level: None,
            game_completed: false,
        };

        if outcome.correct {
            self.progress
                .mark_completed(&level.id, score, outcome.response_time)?;

            match self
                .catalog
                .next_applicable_after(Some(&level.id), self.profile)
            {
                Some(next) => {
                    self.progress.set_current_level(&next.id)?;
                    self.verifier.set_level(Arc::clone(&next));
                    self.current_level = Some(Arc::clone(&next));
                    self.hints_used = 0;
                    info!("Level {} passed, next is {}", level.id, next.id);
                    result.next_level = Some(next);
                }
                None => {
                    info!("Level {} passed, all levels completed", level.id);
                    self.state = GameState::Completed;
                    result.game_completed = true;
                }
            }
        } else {
            self.progress.start_level_timer(Utc::now())?;
        }

        Ok(result)
    }

    /// Score for a submission given the hints revealed so far.
    #[must_use]
    pub fn calculate_score(&self, correct: bool) -> u32 {
        if !correct {
            return 0;
        }
        BASE_SCORE.saturating_sub(self.hints_used.saturating_mul(HINT_PENALTY))
    }

    /// Reveals the next hint of the current level.
    pub fn hint(&mut self) -> Result<HintResult, GameError> {
        let level = self.current_level.clone().ok_or(GameError::NoActiveLevel)?;
        let total = level.hints.len();
        let index = usize::try_from(self.hints_used).unwrap_or(usize::MAX);

        let Some(hint) = level.hints.get(index) else {
            return Ok(HintResult {
                hint: None,
                shown: self.hints_used,
                total,
                exhausted: true,
            });
        };

        self.hints_used += 1;
        self.progress.set_hints_used(self.hints_used)?;

        Ok(HintResult {
            hint: Some(hint.clone()),
            shown: self.hints_used,
            total,
            exhausted: false,
        })
    }

    /// Reveals the answer. Counts as every hint plus one for scoring.
    pub fn answer(&mut self) -> Result<AnswerResult, GameError> {
        let level = self.current_level.clone().ok_or(GameError::NoActiveLevel)?;

        let revealed = u32::try_from(level.hints.len()).unwrap_or(u32::MAX);
        self.hints_used = revealed.saturating_add(1);
        self.progress.set_hints_used(self.hints_used)?;

        let expected = self.verifier.expected_keys()?;
        Ok(AnswerResult {
            answer: expected.format(),
            tips: level.tips.clone(),
        })
    }

    /// Hints revealed for the current level.
    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// Levels playable with the session profile.
    #[must_use]
    pub fn levels(&self) -> Vec<Arc<Level>> {
        self.catalog.all_by_profile(self.profile)
    }

    /// Completed levels among those playable with the session profile.
    #[must_use]
    pub fn completed_levels(&self) -> usize {
        self.levels()
            .iter()
            .filter(|level| self.progress.is_completed(&level.id))
            .count()
    }

    /// Number of levels playable with the session profile.
    #[must_use]
    pub fn total_levels(&self) -> usize {
        self.levels().len()
    }

    /// Progress store.
    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Statistics store.
    #[must_use]
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Clears progress, keeping statistics.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.clear(false)
    }

    /// Clears progress and statistics.
    pub fn reset_all(&mut self) -> Result<(), GameError> {
        self.clear(true)
    }

    fn clear(&mut self, include_stats: bool) -> Result<(), GameError> {
        self.state = GameState::Idle;
        self.current_level = None;
        self.hints_used = 0;
        self.verifier.clear_level();

        self.progress.reset()?;
        if include_stats {
            self.stats.reset()?;
        }
        info!("Progress reset (stats included: {include_stats})");
        Ok(())
    }
}
