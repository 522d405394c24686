//! Quest catalog loader.

use std::collections::HashSet;
use std::path::Path;

use arena_core::QuestSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Quest catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestCatalog {
    pub quests: Vec<QuestSpec>,
}

/// Loader for the quest catalog from RON files.
pub struct QuestLoader;

impl QuestLoader {
    /// Load quests, rejecting duplicate ids.
    pub fn load(path: &Path) -> LoadResult<Vec<QuestSpec>> {
        let content = read_file(path)?;
        let catalog: QuestCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quest catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for quest in &catalog.quests {
            if !seen.insert(quest.id) {
                anyhow::bail!("duplicate quest id {} in {}", quest.id, path.display());
            }
        }
        Ok(catalog.quests)
    }
}
