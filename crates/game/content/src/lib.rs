//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML files that tune the arena
//! rules:
//! - Game configuration (data-driven via TOML)
//! - Race × class archetype table (data-driven via RON)
//! - Monster roster and reward name tables (data-driven via RON)
//! - Quest catalog and fixed boards (data-driven via RON)
//!
//! All loaders use arena-core types directly with serde for RON/TOML
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BoardLoader, ConfigLoader, ContentFactory, LoadResult, MonsterLoader, QuestLoader,
    RewardLoader, TablesLoader, TileSpec,
};
