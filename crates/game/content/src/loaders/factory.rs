//! Content factory for building rule tables from data files.

use std::path::{Path, PathBuf};

use arena_core::board::Board;
use arena_core::{ArchetypeTable, GameConfig, MonsterRoster, QuestSpec, RewardTable, Tables};

use crate::loaders::{
    BoardLoader, ConfigLoader, LoadResult, MonsterLoader, QuestLoader, RewardLoader, TablesLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── archetypes.ron
/// ├── monsters.ron
/// ├── rewards.ron
/// ├── quests.ron
/// └── boards/
///     ├── meadow.ron
///     └── gauntlet.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the race × class table from `archetypes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<ArchetypeTable> {
        let path = self.data_dir.join("archetypes.ron");
        TablesLoader::load(&path)
    }

    /// Load the monster roster from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<MonsterRoster> {
        let path = self.data_dir.join("monsters.ron");
        MonsterLoader::load(&path)
    }

    /// Load reward name fragments from `rewards.ron`.
    pub fn load_rewards(&self) -> LoadResult<RewardTable> {
        let path = self.data_dir.join("rewards.ron");
        RewardLoader::load(&path)
    }

    /// Load all three rule tables.
    pub fn load_tables(&self) -> LoadResult<Tables> {
        Ok(Tables::new(
            self.load_archetypes()?,
            self.load_monsters()?,
            self.load_rewards()?,
        ))
    }

    /// Load the quest catalog from `quests.ron`.
    pub fn load_quests(&self) -> LoadResult<Vec<QuestSpec>> {
        let path = self.data_dir.join("quests.ron");
        QuestLoader::load(&path)
    }

    /// Load a board from `boards/{board_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `board_name` - Name of the board file (without `.ron` extension)
    /// * `roster` - Roster used to resolve `Monster(level)` tiles
    pub fn load_board(&self, board_name: &str, roster: &MonsterRoster) -> LoadResult<Board> {
        let path = self
            .data_dir
            .join("boards")
            .join(format!("{}.ron", board_name));
        BoardLoader::load(&path, roster)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_files_name_the_path() {
        let factory = ContentFactory::new("/nonexistent/arena-data");
        let error = factory.load_quests().unwrap_err().to_string();
        assert!(error.contains("quests.ron"), "{error}");
    }
}
