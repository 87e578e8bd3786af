//! Levels command: lists levels with their completion state.

use crate::cli::common::{CliError, CliResult, GlobalArgs};
use crate::models::Level;
use crate::storage::ProgressStore;
use crate::ui;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// List all levels for the active profile
#[derive(Debug, Clone, Args)]
pub struct LevelsArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON-serializable level entry
#[derive(Serialize, Debug)]
struct LevelEntry {
    id: String,
    name: String,
    difficulty: String,
    category: String,
    profile: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
}

#[derive(Serialize, Debug)]
struct LevelsResponse {
    profile: String,
    total: usize,
    completed: usize,
    levels: Vec<LevelEntry>,
}

fn level_status(level: &Level, progress: &ProgressStore) -> &'static str {
    if progress.is_completed(&level.id) {
        "completed"
    } else if progress.is_current(&level.id) {
        "current"
    } else {
        "open"
    }
}

fn build_response(levels: &[Arc<Level>], progress: &ProgressStore, profile: &str) -> LevelsResponse {
    let entries: Vec<LevelEntry> = levels
        .iter()
        .map(|level| LevelEntry {
            id: level.id.clone(),
            name: level.name.clone(),
            difficulty: level.difficulty.label().to_lowercase(),
            category: level.category.clone(),
            profile: level.profile.id().to_string(),
            status: level_status(level, progress),
            score: progress
                .progress()
                .completed_levels
                .get(&level.id)
                .map(|record| record.score),
        })
        .collect();

    LevelsResponse {
        profile: profile.to_string(),
        total: entries.len(),
        completed: entries.iter().filter(|e| e.status == "completed").count(),
        levels: entries,
    }
}

impl LevelsArgs {
    /// Execute the levels command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let game = global.open_game()?;
        let levels = game.levels();

        if self.json {
            let response = build_response(&levels, game.progress(), game.profile().id());
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print!("{}", ui::render_level_list(&levels, game.progress()));
        }

        Ok(())
    }
}
