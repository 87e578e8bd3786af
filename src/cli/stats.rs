//! Stats command: overall progress and attempt statistics.

use crate::cli::common::{CliError, CliResult, GlobalArgs};
use crate::storage::GlobalStats;
use crate::ui;
use clap::Args;
use serde::Serialize;

/// Error rate from which a level is listed as needing practice.
const WEAK_LEVEL_THRESHOLD: f64 = 0.5;

/// Show training statistics
#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct StatsResponse {
    profile: String,
    completed_levels: usize,
    total_levels: usize,
    total_score: u32,
    stats: GlobalStats,
    weak_levels: Vec<String>,
}

impl StatsArgs {
    /// Execute the stats command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let game = global.open_game()?;
        let stats = game.stats().global_stats();
        let weak_levels = game.stats().weak_levels(WEAK_LEVEL_THRESHOLD);

        if self.json {
            let response = StatsResponse {
                profile: game.profile().id().to_string(),
                completed_levels: game.completed_levels(),
                total_levels: game.total_levels(),
                total_score: game.progress().total_score(),
                stats,
                weak_levels,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print!(
                "{}",
                ui::render_stats(
                    game.progress(),
                    &stats,
                    game.completed_levels(),
                    game.total_levels(),
                    &weak_levels,
                )
            );
        }

        Ok(())
    }
}
