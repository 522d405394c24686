//! Combat resolution system.
//!
//! All fight modes are pure functions of their inputs: two combatant
//! snapshots, the [`CombatRules`](crate::config::CombatRules) held by the
//! simulator and, for the random variants, an injected
//! [`RandomSource`](crate::env::RandomSource).
//!
//! # Modes
//!
//! - `resolve_pvp`: higher attack opens, one damage rule for both sides
//! - `resolve_quest`: hero opens, separate hero and monster damage rules
//! - `resolve_pvp_with` / `resolve_quest_with`: same with crits and spread
//! - `resolve_skirmish`: extended-stat initiative, crits and dodges

pub mod damage;
pub mod error;
pub mod log;
#[cfg(feature = "serde")]
pub mod report;
pub mod resolver;
pub mod simulator;

pub use damage::{DamageRule, DamageVariance, Dodge};
pub use error::CombatError;
pub use log::{Blow, CombatantSummary, FightEnd, FightLog, FightMode, FightRound, Side};
#[cfg(feature = "serde")]
pub use report::FightReport;
pub use resolver::{PvpResolver, QuestResolver, RoundResolver, SkirmishResolver, Varied};
pub use simulator::CombatSimulator;
