//! Monster roster loader.

use std::path::Path;

use arena_core::MonsterRoster;

use crate::loaders::{LoadResult, read_file};

/// Loader for the level-indexed monster roster from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<MonsterRoster> {
        let content = read_file(path)?;
        let roster: MonsterRoster = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster roster RON: {}", e))?;

        if roster.variation_percent > 100 {
            anyhow::bail!(
                "monster variation must be at most 100%, got {}",
                roster.variation_percent
            );
        }
        if let Some(template) = roster.monsters.iter().find(|template| template.health == 0) {
            anyhow::bail!("monster {} has no health", template.name);
        }
        Ok(roster)
    }
}
