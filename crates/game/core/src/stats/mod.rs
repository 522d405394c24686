//! Fight-time stat snapshots.
//!
//! Persistent character data lives in [`crate::state`]; this module holds the
//! value types combat consumes. Snapshots are locked at fight start, so a
//! fight resolves the same way regardless of later state changes.

pub mod combatant;

pub use combatant::{Combatant, ExtendedStats};
