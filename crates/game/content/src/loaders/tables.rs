//! Archetype table loader.

use std::path::Path;

use arena_core::ArchetypeTable;
use arena_core::env::{Class, Race};

use crate::loaders::{LoadResult, read_file};

/// Loader for the race × class table from RON files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load the archetype table from a RON file.
    ///
    /// Every race/class pair must resolve, so a table missing a row is
    /// rejected here rather than at character creation.
    pub fn load(path: &Path) -> LoadResult<ArchetypeTable> {
        let content = read_file(path)?;
        let table: ArchetypeTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype RON: {}", e))?;
        Self::check_complete(&table)?;
        Ok(table)
    }

    fn check_complete(table: &ArchetypeTable) -> LoadResult<()> {
        use strum::IntoEnumIterator;

        if let Some(race) = Race::iter().find(|race| table.race(*race).is_none()) {
            anyhow::bail!("archetype table has no row for race {race}");
        }
        if let Some(class) = Class::iter().find(|class| table.class(*class).is_none()) {
            anyhow::bail!("archetype table has no row for class {class}");
        }
        Ok(())
    }
}
