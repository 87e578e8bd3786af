//! Attempt statistics stored as `stats.json` in the data directory.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// File name of the statistics record.
pub const STATS_FILE: &str = "stats.json";

/// A single submission, as reported by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Whether the answer was right
    pub correct: bool,
    /// Time from prompt to answer
    pub response_time: Duration,
    /// Hints revealed before answering
    pub hints_used: u32,
}

/// Aggregated statistics of one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    /// All submissions
    pub total_attempts: u32,
    /// Correct submissions
    pub correct_attempts: u32,
    /// Hints revealed across submissions
    pub total_hints_used: u32,
    /// Sum of response times in milliseconds
    pub total_response_time_ms: u64,
    /// Fastest correct response in milliseconds (0 until the first correct answer)
    pub best_response_time_ms: u64,
    /// Time of the most recent submission
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl LevelStats {
    /// Fraction of wrong submissions, in `0.0..=1.0`.
    #[must_use]
    pub fn error_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.correct_attempts) / f64::from(self.total_attempts)
    }
}

/// Persisted statistics data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Per-level aggregates keyed by level id
    #[serde(default)]
    pub level_stats: BTreeMap<String, LevelStats>,
    /// When the record was first created
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

impl Default for Stats {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            level_stats: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Totals across all levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalStats {
    /// All submissions
    pub total_attempts: u32,
    /// Correct submissions
    pub total_correct: u32,
    /// Distinct levels with at least one submission
    pub levels_attempted: usize,
    /// Hints revealed across submissions
    pub total_hints_used: u32,
    /// Mean response time in milliseconds
    pub average_response_time_ms: u64,
    /// Correct submissions / all submissions
    pub accuracy: f64,
}

/// Reads and writes [`Stats`], saving after every change.
#[derive(Debug)]
pub struct StatsStore {
    file_path: PathBuf,
    stats: Stats,
}

impl StatsStore {
    /// Opens the store in `data_dir`; a missing or unreadable file yields
    /// empty statistics.
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        let file_path = data_dir.join(STATS_FILE);
        let stats = match Self::load(&file_path) {
            Ok(stats) => stats,
            Err(e) => {
                if file_path.exists() {
                    warn!("Starting with empty statistics: {e:#}");
                }
                Stats::default()
            }
        };

        Self { file_path, stats }
    }

    fn load(path: &Path) -> Result<Stats> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stats file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse stats file: {}", path.display()))
    }

    fn save(&mut self) -> Result<()> {
        self.stats.updated_at = Utc::now();

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(&self.stats).context("Failed to serialize stats")?;
        fs::write(&self.file_path, content).with_context(|| {
            format!("Failed to write stats file: {}", self.file_path.display())
        })?;

        debug!("Saved stats to {}", self.file_path.display());
        Ok(())
    }

    /// Path of the backing file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Adds one submission to the level's aggregates.
    pub fn record_attempt(&mut self, level_id: &str, record: AttemptRecord) -> Result<()> {
        let elapsed_ms = u64::try_from(record.response_time.as_millis()).unwrap_or(u64::MAX);
        let stats = self
            .stats
            .level_stats
            .entry(level_id.to_string())
            .or_default();

        stats.total_attempts += 1;
        stats.total_hints_used += record.hints_used;
        stats.total_response_time_ms = stats.total_response_time_ms.saturating_add(elapsed_ms);
        stats.last_attempt_at = Some(Utc::now());

        if record.correct {
            stats.correct_attempts += 1;
            if stats.best_response_time_ms == 0 || elapsed_ms < stats.best_response_time_ms {
                stats.best_response_time_ms = elapsed_ms;
            }
        }

        self.save()
    }

    /// Aggregates of one level, if it was ever attempted.
    #[must_use]
    pub fn level_stats(&self, level_id: &str) -> Option<&LevelStats> {
        self.stats.level_stats.get(level_id)
    }

    /// Totals across all levels.
    #[must_use]
    pub fn global_stats(&self) -> GlobalStats {
        let mut global = GlobalStats {
            levels_attempted: self.stats.level_stats.len(),
            ..GlobalStats::default()
        };
        let mut total_time_ms: u64 = 0;

        for stats in self.stats.level_stats.values() {
            global.total_attempts += stats.total_attempts;
            global.total_correct += stats.correct_attempts;
            global.total_hints_used += stats.total_hints_used;
            total_time_ms = total_time_ms.saturating_add(stats.total_response_time_ms);
        }

        if global.total_attempts > 0 {
            global.average_response_time_ms = total_time_ms / u64::from(global.total_attempts);
            global.accuracy =
                f64::from(global.total_correct) / f64::from(global.total_attempts);
        }

        global
    }

    /// Levels whose error rate is at least `threshold`, sorted by id.
    #[must_use]
    pub fn weak_levels(&self, threshold: f64) -> Vec<String> {
        self.stats
            .level_stats
            .iter()
            .filter(|(_, stats)| stats.total_attempts > 0 && stats.error_rate() >= threshold)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Clears all statistics, keeping the original creation time.
    pub fn reset(&mut self) -> Result<()> {
        self.stats = Stats {
            created_at: self.stats.created_at,
            ..Stats::default()
        };
        self.save()
    }
}
