//! Player progress stored as `progress.json` in the data directory.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// File name of the progress record.
pub const PROGRESS_FILE: &str = "progress.json";

/// Record of a completed level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedLevel {
    /// Last time the level was passed
    pub completed_at: DateTime<Utc>,
    /// Best score achieved
    pub score: u32,
    /// Number of successful completions
    pub attempts: u32,
    /// Fastest correct answer in milliseconds
    pub best_time_ms: u64,
}

/// Persisted progress data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Level the player is currently on (empty before the first session)
    #[serde(default)]
    pub current_level_id: String,
    /// Hints revealed for the current level
    #[serde(default)]
    pub current_hints_used: u32,
    /// Start of the response timer for the current level
    #[serde(default)]
    pub level_started_at: Option<DateTime<Utc>>,
    /// Completed levels keyed by level id
    #[serde(default)]
    pub completed_levels: BTreeMap<String, CompletedLevel>,
    /// Keymap profile of the last session
    #[serde(default)]
    pub profile: String,
    /// When the record was first created
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

impl Default for Progress {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            current_level_id: String::new(),
            current_hints_used: 0,
            level_started_at: None,
            completed_levels: BTreeMap::new(),
            profile: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Reads and writes [`Progress`], saving after every change.
#[derive(Debug)]
pub struct ProgressStore {
    file_path: PathBuf,
    progress: Progress,
}

impl ProgressStore {
    /// Opens the store in `data_dir`.
    ///
    /// A missing or unreadable file yields fresh progress; the directory is
    /// created on first save.
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        let file_path = data_dir.join(PROGRESS_FILE);
        let progress = match Self::load(&file_path) {
            Ok(progress) => progress,
            Err(e) => {
                if file_path.exists() {
                    warn!("Starting with fresh progress: {e:#}");
                } else {
                    debug!("No progress file at {}", file_path.display());
                }
                Progress::default()
            }
        };

        Self {
            file_path,
            progress,
        }
    }

    fn load(path: &Path) -> Result<Progress> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read progress file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse progress file: {}", path.display()))
    }

    fn save(&mut self) -> Result<()> {
        self.progress.updated_at = Utc::now();

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(&self.progress)
            .context("Failed to serialize progress")?;
        fs::write(&self.file_path, content).with_context(|| {
            format!("Failed to write progress file: {}", self.file_path.display())
        })?;

        debug!("Saved progress to {}", self.file_path.display());
        Ok(())
    }

    /// Path of the backing file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Current level id, empty if none was set yet.
    #[must_use]
    pub fn current_level_id(&self) -> &str {
        &self.progress.current_level_id
    }

    /// Moves the player to `level_id`. The hint counter and the response
    /// timer restart when the level changes.
    pub fn set_current_level(&mut self, level_id: &str) -> Result<()> {
        if self.progress.current_level_id != level_id {
            self.progress.current_level_id = level_id.to_string();
            self.progress.current_hints_used = 0;
            self.progress.level_started_at = Some(Utc::now());
        }
        self.save()
    }

    /// When the response timer of the current level started.
    #[must_use]
    pub fn level_started_at(&self) -> Option<DateTime<Utc>> {
        self.progress.level_started_at
    }

    /// Restarts the response timer of the current level at `at`.
    pub fn start_level_timer(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.progress.level_started_at = Some(at);
        self.save()
    }

    /// Hints revealed for the current level.
    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.progress.current_hints_used
    }

    /// Stores the hint counter for the current level.
    pub fn set_hints_used(&mut self, hints: u32) -> Result<()> {
        self.progress.current_hints_used = hints;
        self.save()
    }

    /// Records the keymap profile of the session.
    pub fn set_profile(&mut self, profile: &str) -> Result<()> {
        if self.progress.profile == profile {
            return Ok(());
        }
        self.progress.profile = profile.to_string();
        self.save()
    }

    /// Marks `level_id` as completed, keeping the best score and time.
    pub fn mark_completed(&mut self, level_id: &str, score: u32, elapsed: Duration) -> Result<()> {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let now = Utc::now();

        self.progress
            .completed_levels
            .entry(level_id.to_string())
            .and_modify(|existing| {
                existing.completed_at = now;
                existing.attempts += 1;
                existing.score = existing.score.max(score);
                existing.best_time_ms = existing.best_time_ms.min(elapsed_ms);
            })
            .or_insert(CompletedLevel {
                completed_at: now,
                score,
                attempts: 1,
                best_time_ms: elapsed_ms,
            });

        self.save()
    }

    /// True if `level_id` was completed at least once.
    #[must_use]
    pub fn is_completed(&self, level_id: &str) -> bool {
        self.progress.completed_levels.contains_key(level_id)
    }

    /// True if `level_id` is the current level.
    #[must_use]
    pub fn is_current(&self, level_id: &str) -> bool {
        self.progress.current_level_id == level_id
    }

    /// Number of completed levels.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.progress.completed_levels.len()
    }

    /// Sum of the best scores of all completed levels.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.progress
            .completed_levels
            .values()
            .map(|level| level.score)
            .sum()
    }

    /// Read-only view of the full record.
    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Clears all progress, keeping the original creation time.
    pub fn reset(&mut self) -> Result<()> {
        self.progress = Progress {
            created_at: self.progress.created_at,
            ..Progress::default()
        };
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ProgressStore::open(temp.path());

        assert_eq!(store.current_level_id(), "");
        assert_eq!(store.completed_count(), 0);
        assert_eq!(store.total_score(), 0);
        assert!(!store.file_path().exists());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROGRESS_FILE), "{ not json").unwrap();

        let store = ProgressStore::open(temp.path());
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn test_progress_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("nested").join("data");

        let mut store = ProgressStore::open(&data_dir);
        store.set_current_level("002-undo").unwrap();
        store
            .mark_completed("001-save", 80, Duration::from_millis(1500))
            .unwrap();

        let reopened = ProgressStore::open(&data_dir);
        assert_eq!(reopened.current_level_id(), "002-undo");
        assert!(reopened.is_completed("001-save"));
        assert!(reopened.is_current("002-undo"));
        assert_eq!(reopened.total_score(), 80);
    }

    #[test]
    fn test_mark_completed_keeps_best_score_and_time() {
        let temp = TempDir::new().unwrap();
        let mut store = ProgressStore::open(temp.path());

        store
            .mark_completed("001", 60, Duration::from_millis(900))
            .unwrap();
        store
            .mark_completed("001", 40, Duration::from_millis(400))
            .unwrap();

        let record = &store.progress().completed_levels["001"];
        assert_eq!(record.score, 60);
        assert_eq!(record.best_time_ms, 400);
        assert_eq!(record.attempts, 2);
        assert_eq!(store.completed_count(), 1);
    }

    #[test]
    fn test_hint_counter_resets_on_level_change() {
        let temp = TempDir::new().unwrap();
        let mut store = ProgressStore::open(temp.path());

        store.set_current_level("001").unwrap();
        store.set_hints_used(2).unwrap();
        store.set_current_level("001").unwrap();
        assert_eq!(store.hints_used(), 2);

        store.set_current_level("002").unwrap();
        assert_eq!(store.hints_used(), 0);
    }

    #[test]
    fn test_level_timer_follows_level_changes() {
        let temp = TempDir::new().unwrap();
        let mut store = ProgressStore::open(temp.path());
        assert!(store.level_started_at().is_none());

        store.set_current_level("001").unwrap();
        let started = store.level_started_at().unwrap();

        // Same level keeps the timer
        store.set_current_level("001").unwrap();
        assert_eq!(store.level_started_at(), Some(started));

        let earlier = started - chrono::TimeDelta::seconds(30);
        store.start_level_timer(earlier).unwrap();
        let reopened = ProgressStore::open(temp.path());
        assert_eq!(reopened.level_started_at(), Some(earlier));

        store.set_current_level("002").unwrap();
        assert!(store.level_started_at().unwrap() >= started);
    }

    #[test]
    fn test_reset_keeps_created_at() {
        let temp = TempDir::new().unwrap();
        let mut store = ProgressStore::open(temp.path());
        store.set_current_level("001").unwrap();
        store.mark_completed("001", 100, Duration::ZERO).unwrap();
        let created = store.progress().created_at;

        store.reset().unwrap();
        assert_eq!(store.current_level_id(), "");
        assert_eq!(store.completed_count(), 0);
        assert_eq!(store.progress().created_at, created);
    }

    #[test]
    fn test_json_layout() {
        let temp = TempDir::new().unwrap();
        let mut store = ProgressStore::open(temp.path());
        store
            .mark_completed("001", 100, Duration::from_millis(250))
            .unwrap();

        let raw = fs::read_to_string(store.file_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["completed_levels"]["001"]["score"], 100);
        assert_eq!(value["completed_levels"]["001"]["best_time_ms"], 250);
        assert!(value["created_at"].is_string());
    }
}
