//! Level catalog loaded from a directory of YAML files.
//!
//! Levels live in difficulty subdirectories that are scanned in a fixed order:
//!
//! ```text
//! levels/
//! ├── beginner/        001-save-file.yaml, 002-undo.yaml, ...
//! ├── intermediate/
//! ├── advanced/
//! └── vim/
//! ```
//!
//! Within a directory files are ordered by name. The resulting sequence is the
//! play order.

use crate::models::{KeymapProfile, Level};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Subdirectories scanned, in play order.
pub const LEVEL_DIRECTORIES: [&str; 4] = ["beginner", "intermediate", "advanced", "vim"];

/// Errors raised while loading levels.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A directory or file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A level file is not valid YAML for a level
    #[error("Failed to parse level file {}: {source}", path.display())]
    Parse {
        /// Offending file
        path: PathBuf,
        /// Underlying YAML error
        source: serde_yml::Error,
    },

    /// Two files declare the same level id
    #[error("Duplicate level id '{id}' in {}", path.display())]
    DuplicateId {
        /// Repeated id
        id: String,
        /// Second file declaring it
        path: PathBuf,
    },

    /// No level files were found
    #[error("No levels available in {}", .0.display())]
    NoLevels(PathBuf),
}

/// Ordered, immutable collection of levels.
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: HashMap<String, Arc<Level>>,
    order: Vec<String>,
}

impl LevelCatalog {
    /// Loads every level under `levels_dir`.
    ///
    /// Missing difficulty subdirectories are skipped. Fails with
    /// [`CatalogError::NoLevels`] if nothing was loaded.
    pub fn load(levels_dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for dir in LEVEL_DIRECTORIES {
            let dir_path = levels_dir.join(dir);
            if !dir_path.is_dir() {
                continue;
            }

            let entries = fs::read_dir(&dir_path).map_err(|source| CatalogError::Read {
                path: dir_path.clone(),
                source,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|source| CatalogError::Read {
                        path: dir_path.clone(),
                        source,
                    })?
                    .path();
                if path.is_file() && is_level_file(&path) {
                    files.push(path);
                }
            }
            files.sort();

            for path in files {
                let level = load_level_file(&path)?;
                debug!("Loaded level {} from {}", level.id, path.display());
                catalog.insert(level, &path)?;
            }
        }

        if catalog.is_empty() {
            return Err(CatalogError::NoLevels(levels_dir.to_path_buf()));
        }

        debug!("Loaded {} levels from {}", catalog.len(), levels_dir.display());
        Ok(catalog)
    }

    /// Builds a catalog from levels already in play order.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for level in levels {
            catalog.insert(level, Path::new("<memory>"))?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, level: Level, path: &Path) -> Result<(), CatalogError> {
        let level = level.normalized();
        if self.levels.contains_key(&level.id) {
            return Err(CatalogError::DuplicateId {
                id: level.id,
                path: path.to_path_buf(),
            });
        }
        self.order.push(level.id.clone());
        self.levels.insert(level.id.clone(), Arc::new(level));
        Ok(())
    }

    /// Looks up a level by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Level>> {
        self.levels.get(id).cloned()
    }

    /// First level in play order.
    #[must_use]
    pub fn first(&self) -> Option<Arc<Level>> {
        self.order.first().and_then(|id| self.get(id))
    }

    /// Level following `id` in play order, regardless of profile.
    #[must_use]
    pub fn next_after(&self, id: &str) -> Option<Arc<Level>> {
        let index = self.order.iter().position(|current| current == id)?;
        self.order.get(index + 1).and_then(|next| self.get(next))
    }

    /// Next level applicable to `profile` after `id`, or the first one if `id`
    /// is `None`. An unknown `id` yields `None`.
    #[must_use]
    pub fn next_applicable_after(
        &self,
        id: Option<&str>,
        profile: KeymapProfile,
    ) -> Option<Arc<Level>> {
        let start = match id {
            Some(id) => self.order.iter().position(|current| current == id)? + 1,
            None => 0,
        };

        self.order[start..]
            .iter()
            .filter_map(|id| self.levels.get(id))
            .find(|level| level.profile.applies_to(profile))
            .cloned()
    }

    /// All levels in play order.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<Level>> {
        self.order.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Levels playable with `profile`, in play order.
    #[must_use]
    pub fn all_by_profile(&self, profile: KeymapProfile) -> Vec<Arc<Level>> {
        self.all()
            .into_iter()
            .filter(|level| level.profile.applies_to(profile))
            .collect()
    }

    /// Total number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no levels are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn is_level_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn load_level_file(path: &Path) -> Result<Level, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yml::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
