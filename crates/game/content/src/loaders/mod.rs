//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into the arena-core type it
//! describes. [`ContentFactory`] knows the file layout of a data directory.

pub mod board;
pub mod config;
pub mod factory;
pub mod monsters;
pub mod quests;
pub mod rewards;
pub mod tables;

pub use board::{BoardLoader, TileSpec};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use monsters::MonsterLoader;
pub use quests::QuestLoader;
pub use rewards::RewardLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
