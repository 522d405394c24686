//! Deterministic combat and progression rules for the arena game.
//!
//! `arena-core` defines the canonical rules (fights, experience, quests,
//! the board mini-game and random events) as synchronous functions over
//! plain values. Randomness is always injected through
//! [`env::RandomSource`], so every outcome is reproducible from a seed.
//! Persistence, transport and presentation belong to the caller.
pub mod board;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod progression;
pub mod quest;
pub mod state;
pub mod stats;

pub use board::{Board, BoardError, BoardGame, BoardSummary, TileKind, TileOutcome, TurnOutcome};
#[cfg(feature = "serde")]
pub use combat::FightReport;
pub use combat::{
    Blow, CombatError, CombatSimulator, DamageRule, DamageVariance, Dodge, FightEnd, FightLog,
    FightMode, FightRound, RoundResolver, Side,
};
pub use config::{
    BoardRules, CombatRules, ConfigError, GameConfig, HealthPolicy, ProgressionRules, QuestRules,
    TileWeights,
};
pub use env::{
    ArchetypeTable, Class, ItemDefinition, ItemEffect, ItemKind, MonsterRoster, RandomSource,
    Race, RewardTable, SeededRng, Tables,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{EventEffect, EventError, EventKind, GameEvent, MerchantOffer, generate_event};
pub use progression::{LevelUpResult, apply_experience, level_threshold};
pub use quest::{QuestError, QuestSettlement, QuestSpec, commit_fight, run_quest, settle_quest};
pub use state::{CharacterId, CharacterSheet, Inventory, InventoryError};
pub use stats::{Combatant, ExtendedStats};
