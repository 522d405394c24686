//! Board mini-game: a linear track the hero walks with a d6.
//!
//! Tiles are drawn once when the board is generated. Landing on an item
//! picks it up, landing on an enemy starts a quest-style fight whose damage
//! sticks. Moving past the last tile completes the board; dropping to zero
//! health ends it.
mod game;
mod tile;

pub use game::{BoardError, BoardGame, BoardSummary, TileOutcome, TurnOutcome};
pub use tile::{Board, TileKind};
