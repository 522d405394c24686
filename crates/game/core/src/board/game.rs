use crate::combat::{CombatError, CombatSimulator, FightLog, Side};
use crate::config::{GameConfig, HealthPolicy};
use crate::env::{ArchetypeTable, ItemDefinition, RandomSource};
use crate::error::{ErrorSeverity, GameError};
use crate::progression::{LevelUpResult, apply_experience};
use crate::quest::commit_fight;
use crate::state::CharacterSheet;

use super::tile::{Board, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board game already finished")]
    GameFinished,

    #[error("board has no tiles")]
    EmptyBoard,

    #[error("board fight failed: {0}")]
    Combat(#[from] CombatError),
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameFinished => ErrorSeverity::Recoverable,
            Self::EmptyBoard => ErrorSeverity::Internal,
            Self::Combat(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameFinished => "BOARD_GAME_FINISHED",
            Self::EmptyBoard => "BOARD_EMPTY",
            Self::Combat(err) => err.error_code(),
        }
    }
}

/// What the landed-on tile did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileOutcome {
    Empty,
    /// `stored` is false when the bag was full; the item stays on the tile.
    Item { item: ItemDefinition, stored: bool },
    Fight { log: FightLog, won: bool },
    Unknown(String),
    /// Moved past the last tile.
    Finish,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub turn: u32,
    pub roll: u32,
    pub from: u32,
    pub position: u32,
    pub tile: TileOutcome,
    pub level_up: Option<LevelUpResult>,
    pub is_completed: bool,
    pub is_game_over: bool,
}

/// Totals for a finished board game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSummary {
    pub turns: u32,
    pub position: u32,
    pub is_completed: bool,
    pub is_game_over: bool,
    pub experience_gained: u32,
    pub items_found: u32,
    pub enemies_defeated: u32,
    pub final_health: u32,
}

/// One hero walking one board.
///
/// The game owns the hero's sheet until it is handed back with
/// [`into_hero`](Self::into_hero). Fight damage is committed after every
/// battle, so health carries over from tile to tile.
#[derive(Clone, Debug)]
pub struct BoardGame {
    hero: CharacterSheet,
    board: Board,
    config: GameConfig,
    archetypes: ArchetypeTable,
    simulator: CombatSimulator,
    position: u32,
    summary: BoardSummary,
}

impl BoardGame {
    pub fn new(hero: CharacterSheet, board: Board, config: GameConfig) -> Self {
        let simulator = CombatSimulator::new(config.combat);
        let summary = BoardSummary {
            is_game_over: !hero.is_alive(),
            final_health: hero.health,
            ..BoardSummary::default()
        };
        Self {
            hero,
            board,
            config,
            archetypes: ArchetypeTable::standard(),
            simulator,
            position: 0,
            summary,
        }
    }

    /// Level-up table used for experience awards.
    #[must_use]
    pub fn with_archetypes(mut self, archetypes: ArchetypeTable) -> Self {
        self.archetypes = archetypes;
        self
    }

    pub fn hero(&self) -> &CharacterSheet {
        &self.hero
    }

    pub fn into_hero(self) -> CharacterSheet {
        self.hero
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn is_completed(&self) -> bool {
        self.summary.is_completed
    }

    pub fn is_game_over(&self) -> bool {
        self.summary.is_game_over
    }

    pub fn is_finished(&self) -> bool {
        self.is_completed() || self.is_game_over()
    }

    pub fn summary(&self) -> BoardSummary {
        self.summary
    }

    /// Roll a d6, move and resolve the tile landed on.
    ///
    /// # Errors
    ///
    /// - [`BoardError::GameFinished`] after completion or game over
    /// - [`BoardError::EmptyBoard`] if the board has no tiles
    pub fn play_turn(&mut self, rng: &mut impl RandomSource) -> Result<TurnOutcome, BoardError> {
        if self.is_finished() {
            return Err(BoardError::GameFinished);
        }
        if self.board.is_empty() {
            return Err(BoardError::EmptyBoard);
        }

        let roll = rng.roll_die(6);
        let from = self.position;
        self.position = from.saturating_add(roll).min(self.board.len());
        self.summary.turns += 1;
        tracing::debug!(
            "turn {}: {} rolls {roll} and moves {from} -> {}",
            self.summary.turns,
            self.hero.name,
            self.position
        );

        let (tile, mut level_up) = if self.position >= self.board.len() {
            (TileOutcome::Finish, None)
        } else {
            self.resolve_tile(rng)?
        };

        if matches!(tile, TileOutcome::Finish) {
            self.summary.is_completed = true;
            level_up = self.award(self.config.board.completion_xp).or(level_up);
            tracing::info!(
                "{} completed the board in {} turns",
                self.hero.name,
                self.summary.turns
            );
        }
        if !self.hero.is_alive() {
            self.summary.is_game_over = true;
            tracing::info!("{} fell at tile {}", self.hero.name, self.position);
        }
        self.summary.position = self.position;
        self.summary.final_health = self.hero.health;

        Ok(TurnOutcome {
            turn: self.summary.turns,
            roll,
            from,
            position: self.position,
            tile,
            level_up,
            is_completed: self.summary.is_completed,
            is_game_over: self.summary.is_game_over,
        })
    }

    /// Play turns until the board is completed or the hero falls.
    pub fn play_game(&mut self, rng: &mut impl RandomSource) -> Result<BoardSummary, BoardError> {
        while !self.is_finished() {
            self.play_turn(rng)?;
        }
        Ok(self.summary)
    }

    fn resolve_tile(
        &mut self,
        rng: &mut impl RandomSource,
    ) -> Result<(TileOutcome, Option<LevelUpResult>), BoardError> {
        let position = self.position;
        let Some(tile) = self.board.tile(position).cloned() else {
            return Ok((TileOutcome::Empty, None));
        };

        match tile {
            TileKind::Empty => Ok((TileOutcome::Empty, None)),
            TileKind::Item(item) => {
                let stored = match self.hero.inventory.add(item.clone(), 1) {
                    Ok(()) => {
                        self.board.clear(position);
                        self.summary.items_found += 1;
                        self.hero.record.items_collected =
                            self.hero.record.items_collected.saturating_add(1);
                        true
                    }
                    Err(err) => {
                        tracing::warn!("{} left {} on the board: {err}", self.hero.name, item.name);
                        false
                    }
                };
                Ok((TileOutcome::Item { item, stored }, None))
            }
            TileKind::Enemy(enemy) => {
                let log =
                    self.simulator
                        .resolve_quest_with(&self.hero.to_combatant(), &enemy, rng)?;
                commit_fight(&mut self.hero, &log, Side::Left, HealthPolicy::Commit);

                let won = log.winner == Side::Left;
                self.hero.record.record_fight(won);
                let mut level_up = None;
                if won {
                    self.board.clear(position);
                    self.summary.enemies_defeated += 1;
                    self.hero.record.monsters_defeated =
                        self.hero.record.monsters_defeated.saturating_add(1);
                    level_up = self.award(self.config.board.enemy_xp);
                }
                Ok((TileOutcome::Fight { log, won }, level_up))
            }
            TileKind::Unknown(kind) => {
                tracing::warn!("unknown tile {kind:?} at {position}, skipping");
                Ok((TileOutcome::Unknown(kind), None))
            }
        }
    }

    fn award(&mut self, xp: u32) -> Option<LevelUpResult> {
        if xp == 0 {
            return None;
        }
        self.summary.experience_gained = self.summary.experience_gained.saturating_add(xp);
        let result = apply_experience(
            &mut self.hero,
            xp,
            &self.archetypes,
            &self.config.progression,
        );
        result.leveled_up().then_some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Class, Race};
    use crate::state::{CharacterId, Inventory};
    use crate::stats::Combatant;

    struct Dice(Vec<u32>, usize);

    impl RandomSource for Dice {
        /// Values are die faces; `range(1, 6)` maps `face - 1` back to `face`.
        fn next_u32(&mut self) -> u32 {
            let face = self.0[self.1 % self.0.len()];
            self.1 += 1;
            face - 1
        }
    }

    fn hero() -> CharacterSheet {
        CharacterSheet::create(
            CharacterId(1),
            "Lyra",
            Race::Elf,
            Class::Archer,
            &ArchetypeTable::standard(),
        )
        .unwrap()
    }

    #[test]
    fn finished_game_rejects_turns() {
        let board = Board::from_tiles(vec![TileKind::Empty; 3]);
        let mut game = BoardGame::new(hero(), board, GameConfig::default());
        let mut dice = Dice(vec![6], 0);

        let outcome = game.play_turn(&mut dice).unwrap();
        assert_eq!(outcome.position, 3);
        assert!(outcome.is_completed);
        assert_eq!(game.play_turn(&mut dice), Err(BoardError::GameFinished));
    }

    #[test]
    fn empty_board_is_an_error() {
        let mut game = BoardGame::new(hero(), Board::default(), GameConfig::default());
        assert_eq!(
            game.play_turn(&mut Dice(vec![1], 0)),
            Err(BoardError::EmptyBoard)
        );
    }

    #[test]
    fn items_are_picked_up_unless_bag_is_full() {
        let tiles = vec![
            TileKind::Empty,
            TileKind::Item(ItemDefinition::life_potion()),
            TileKind::Empty,
            TileKind::Empty,
        ];
        let mut game = BoardGame::new(hero(), Board::from_tiles(tiles.clone()), GameConfig::default());
        game.play_turn(&mut Dice(vec![1], 0)).unwrap();
        assert_eq!(game.board().tile(1), Some(&TileKind::Empty));
        assert_eq!(game.hero().inventory.count("Life Potion"), 1);

        let full = hero().with_inventory(Inventory::new(0));
        let mut game = BoardGame::new(full, Board::from_tiles(tiles), GameConfig::default());
        let outcome = game.play_turn(&mut Dice(vec![1], 0)).unwrap();
        assert!(matches!(outcome.tile, TileOutcome::Item { stored: false, .. }));
        assert!(matches!(game.board().tile(1), Some(TileKind::Item(_))));
    }

    #[test]
    fn losing_a_fight_ends_the_game() {
        let tiles = vec![
            TileKind::Empty,
            TileKind::Enemy(Combatant::new("Hydra", 5_000, 999, 0)),
            TileKind::Empty,
        ];
        let mut game = BoardGame::new(hero(), Board::from_tiles(tiles), GameConfig::default());
        let outcome = game.play_turn(&mut Dice(vec![1], 0)).unwrap();

        assert!(matches!(outcome.tile, TileOutcome::Fight { won: false, .. }));
        assert!(outcome.is_game_over);
        assert_eq!(game.hero().health, 0);
        assert_eq!(game.play_turn(&mut Dice(vec![1], 0)), Err(BoardError::GameFinished));
    }

    #[test]
    fn unknown_tiles_are_skipped() {
        let tiles = vec![TileKind::Empty, TileKind::Unknown("portal".into()), TileKind::Empty];
        let mut game = BoardGame::new(hero(), Board::from_tiles(tiles), GameConfig::default());
        let outcome = game.play_turn(&mut Dice(vec![1], 0)).unwrap();
        assert_eq!(outcome.tile, TileOutcome::Unknown("portal".into()));
        assert!(!game.is_finished());
    }

    #[test]
    fn defeated_enemies_grant_experience() {
        let tiles = vec![
            TileKind::Empty,
            TileKind::Enemy(Combatant::new("Slime", 1, 1, 0)),
            TileKind::Empty,
        ];
        let mut game = BoardGame::new(hero(), Board::from_tiles(tiles), GameConfig::default());
        game.play_turn(&mut Dice(vec![1], 0)).unwrap();

        assert_eq!(game.board().tile(1), Some(&TileKind::Empty));
        assert_eq!(game.hero().experience, GameConfig::DEFAULT_ENEMY_XP);
        assert_eq!(game.summary().enemies_defeated, 1);
    }
}
