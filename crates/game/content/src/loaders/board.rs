//! Fixed board loader.

use std::path::Path;

use arena_core::board::{Board, TileKind};
use arena_core::{Combatant, ItemDefinition, MonsterRoster};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Tile as written in board files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileSpec {
    Empty,
    /// The standard life potion.
    Potion,
    Item(ItemDefinition),
    /// Roster monster for the given level, at template stats.
    Monster(u32),
    Enemy(Combatant),
    /// Anything the rules do not understand; kept as an unknown tile.
    Other(String),
}

impl TileSpec {
    pub fn into_tile(self, roster: &MonsterRoster) -> TileKind {
        match self {
            Self::Empty => TileKind::Empty,
            Self::Potion => TileKind::Item(ItemDefinition::life_potion()),
            Self::Item(item) => TileKind::Item(item),
            Self::Monster(level) => TileKind::Enemy(roster.template(level).to_combatant()),
            Self::Enemy(enemy) => TileKind::Enemy(enemy),
            Self::Other(kind) => TileKind::Unknown(kind),
        }
    }
}

/// Board structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardData {
    tiles: Vec<TileSpec>,
}

/// Loader for hand-made boards from RON files.
pub struct BoardLoader;

impl BoardLoader {
    /// Load a board, resolving `Monster(level)` tiles through `roster`.
    pub fn load(path: &Path, roster: &MonsterRoster) -> LoadResult<Board> {
        let content = read_file(path)?;
        Self::parse(&content, roster)
            .map_err(|e| anyhow::anyhow!("Invalid board {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, roster: &MonsterRoster) -> LoadResult<Board> {
        let data: BoardData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON: {}", e))?;
        if data.tiles.is_empty() {
            anyhow::bail!("board has no tiles");
        }

        let tiles: Vec<TileKind> = data
            .tiles
            .into_iter()
            .map(|spec| spec.into_tile(roster))
            .collect();
        let unknown = tiles
            .iter()
            .filter(|tile| matches!(tile, TileKind::Unknown(_)))
            .count();
        if unknown > 0 {
            tracing::warn!("board contains {unknown} unknown tiles");
        }
        Ok(Board::from_tiles(tiles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monster_tiles_use_roster_templates() {
        let roster = MonsterRoster::standard();
        let board = BoardLoader::parse(
            r#"(tiles: [Empty, Potion, Monster(2), Other("portal")])"#,
            &roster,
        )
        .unwrap();

        assert_eq!(board.len(), 4);
        match board.tile(2) {
            Some(TileKind::Enemy(enemy)) => {
                assert_eq!(enemy.name, "Wild Wolf");
                assert_eq!((enemy.health, enemy.attack), (40, 8));
            }
            other => panic!("expected an enemy, got {other:?}"),
        }
        assert_eq!(board.tile(3), Some(&TileKind::Unknown("portal".into())));
    }

    #[test]
    fn empty_board_is_rejected() {
        assert!(BoardLoader::parse("(tiles: [])", &MonsterRoster::standard()).is_err());
    }
}
