use crate::config::TileWeights;
use crate::env::{ItemDefinition, RandomSource, Tables};
use crate::stats::Combatant;

/// Content of one board square.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Empty,
    Item(ItemDefinition),
    Enemy(Combatant),
    /// Tile the rules do not know how to resolve. Landing on it is a no-op.
    Unknown(String),
}

impl TileKind {
    pub fn is_enemy(&self) -> bool {
        matches!(self, Self::Enemy(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Linear track of tiles. The hero starts on tile 0, which is never
/// resolved: the first roll moves past it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    tiles: Vec<TileKind>,
}

impl Board {
    /// Fixed board, e.g. loaded from content files.
    pub fn from_tiles(tiles: Vec<TileKind>) -> Self {
        Self { tiles }
    }

    /// Draw `length` tiles by weight. Enemies are spawned from the monster
    /// roster and items rolled from the reward table, both at `level`.
    pub fn generate(
        length: u32,
        weights: TileWeights,
        level: u32,
        tables: &Tables,
        rng: &mut impl RandomSource,
    ) -> Self {
        let weights = weights.as_array();
        let tiles = (0..length)
            .map(|index| match rng.weighted_index(&weights) {
                Some(1) => TileKind::Item(tables.rewards.generate(level, None, rng)),
                Some(2) => {
                    let mut enemy = tables.monsters.spawn(level, rng);
                    enemy.name = format!("{} at {index}", enemy.name);
                    TileKind::Enemy(enemy)
                }
                _ => TileKind::Empty,
            })
            .collect();
        Self { tiles }
    }

    pub fn len(&self) -> u32 {
        self.tiles.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn tile(&self, position: u32) -> Option<&TileKind> {
        self.tiles.get(position as usize)
    }

    /// Replace a tile with [`TileKind::Empty`], returning what was there.
    pub fn clear(&mut self, position: u32) -> Option<TileKind> {
        self.tiles
            .get_mut(position as usize)
            .map(core::mem::take)
    }

    pub fn enemy_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_enemy()).count()
    }
}
