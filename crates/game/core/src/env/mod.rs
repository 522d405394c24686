//! Read-only rule data and injected randomness.
//!
//! Tables expose race/class stat rows, the monster roster, reward item name
//! fragments and item definitions. [`Tables`] bundles them so the quest,
//! board and event rules can reach everything they need through a single
//! borrow. Randomness always arrives as an explicit [`RandomSource`].
mod items;
mod monsters;
mod rewards;
mod rng;
mod tables;

pub use items::{ItemDefinition, ItemEffect, ItemKind};
pub use monsters::{MonsterRoster, MonsterTemplate};
pub use rewards::RewardTable;
pub use rng::{PcgRng, RandomSource, RngOracle, SeededRng, compute_seed};
pub use tables::{
    Archetype, ArchetypeError, ArchetypeTable, Class, ClassProfile, Race, RaceProfile, StatLine,
    StatMultipliers,
};

/// Aggregates the data tables consumed by the rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tables {
    pub archetypes: ArchetypeTable,
    pub monsters: MonsterRoster,
    pub rewards: RewardTable,
}

impl Tables {
    pub fn new(archetypes: ArchetypeTable, monsters: MonsterRoster, rewards: RewardTable) -> Self {
        Self {
            archetypes,
            monsters,
            rewards,
        }
    }

    /// Built-in tables.
    pub fn standard() -> Self {
        Self::default()
    }
}
