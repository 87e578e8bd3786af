//! Flat JSON persistence for progress and statistics.

pub mod progress;
pub mod stats;

pub use progress::{CompletedLevel, Progress, ProgressStore, PROGRESS_FILE};
pub use stats::{AttemptRecord, GlobalStats, LevelStats, Stats, StatsStore, STATS_FILE};
