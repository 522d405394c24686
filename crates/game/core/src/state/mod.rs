//! Persistent character state: sheets, bags and equipment.
//!
//! A [`CharacterSheet`] is what a character store keeps between requests.
//! Rules in this crate take `&mut CharacterSheet` and commit their changes
//! in one step, so a caller can wrap each call in its own transaction.
mod character;
mod inventory;

pub use character::{BattleRecord, CharacterId, CharacterSheet, EquipSlot, Equipment};
pub use inventory::{Inventory, InventoryError, InventorySlot};
