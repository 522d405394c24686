//! Reward name table loader.

use std::path::Path;

use arena_core::RewardTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for reward item name fragments from RON files.
pub struct RewardLoader;

impl RewardLoader {
    pub fn load(path: &Path) -> LoadResult<RewardTable> {
        let content = read_file(path)?;
        let table: RewardTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse reward table RON: {}", e))?;
        Ok(table)
    }
}
