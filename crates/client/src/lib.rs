//! Arena session runner.
//!
//! ```text
//! Session
//!   ├─→ ClientConfig (mode, seed, archetypes, from the environment)
//!   ├─→ Content      (GameConfig + tables + quests, from a data directory or built in)
//!   └─→ SeededRng    (every random draw of the session)
//! ```
//!
//! A session plays exactly one encounter and returns it as JSON. Storage of
//! the resulting character sheets is left to whoever embeds the session.

mod builder;
pub mod config;
pub mod logging;

pub use builder::SessionBuilder;
pub use config::{ClientConfig, SessionMode};

use std::path::Path;

use anyhow::{Context, Result};
use arena_content::ContentFactory;
use arena_core::board::Board;
use arena_core::env::{Class, Race};
use arena_core::{
    CharacterId, CharacterSheet, CombatSimulator, FightReport, GameConfig, GameEvent, Inventory,
    QuestSpec, SeededRng, Side, Tables, apply_experience, commit_fight, generate_event,
    level_threshold, run_quest,
};
use serde_json::{Value, json};

/// Rules and data a session plays with.
pub struct Content {
    pub config: GameConfig,
    pub tables: Tables,
    pub quests: Vec<QuestSpec>,
    factory: Option<ContentFactory>,
}

impl Content {
    /// Built-in tables, default config and one quest per roster level.
    pub fn builtin() -> Self {
        let quests = (1..=10)
            .map(|level| QuestSpec::new(level, level, level * 50, level * 10))
            .collect();
        Self {
            config: GameConfig::default(),
            tables: Tables::standard(),
            quests,
            factory: None,
        }
    }

    /// Load everything from a content directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let factory = ContentFactory::new(data_dir);
        let content = Self {
            config: factory.load_config()?,
            tables: factory.load_tables()?,
            quests: factory.load_quests()?,
            factory: Some(factory),
        };
        tracing::info!(
            "Loaded content from {} ({} quests)",
            data_dir.display(),
            content.quests.len()
        );
        Ok(content)
    }

    fn load_board(&self, name: &str) -> Result<Board> {
        let factory = self
            .factory
            .as_ref()
            .context("ARENA_BOARD requires ARENA_DATA_DIR")?;
        factory.load_board(name, &self.tables.monsters)
    }
}

/// One configured encounter.
pub struct Session {
    config: ClientConfig,
    content: Content,
    rng: SeededRng,
}

impl Session {
    /// Build a session, loading content from `config.data_dir` if set.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Play the configured mode and return its report.
    pub fn run(&mut self) -> Result<Value> {
        match self.config.mode {
            SessionMode::Pvp => self.run_pvp(),
            SessionMode::Quest => self.run_quest(),
            SessionMode::Skirmish => self.run_skirmish(),
            SessionMode::Board => self.run_board(),
            SessionMode::Event => self.run_event(),
        }
    }

    fn simulator(&self) -> CombatSimulator {
        CombatSimulator::new(self.content.config.combat)
    }

    /// Fresh character raised to the configured level.
    fn character(&self, id: u32, name: &str, race: Race, class: Class) -> Result<CharacterSheet> {
        let config = &self.content.config;
        let mut sheet =
            CharacterSheet::create(CharacterId(id), name, race, class, &self.content.tables.archetypes)?
                .with_inventory(Inventory::starter(config.inventory_slots));

        let xp = level_threshold(self.config.level.saturating_sub(1), &config.progression);
        if xp > 0 {
            let xp = u32::try_from(xp).unwrap_or(u32::MAX);
            apply_experience(&mut sheet, xp, &self.content.tables.archetypes, &config.progression);
        }
        Ok(sheet)
    }

    fn hero(&self) -> Result<CharacterSheet> {
        self.character(1, "Hero", self.config.race, self.config.class)
    }

    fn quest(&self) -> Result<QuestSpec> {
        let quests = &self.content.quests;
        let found = match self.config.quest_id {
            Some(id) => quests.iter().find(|quest| quest.id == id),
            None => quests.iter().find(|quest| quest.level == self.config.level),
        };
        found.copied().with_context(|| match self.config.quest_id {
            Some(id) => format!("unknown quest {id}"),
            None => format!("no quest for level {}", self.config.level),
        })
    }

    fn run_pvp(&mut self) -> Result<Value> {
        let mut hero = self.hero()?;
        let mut rival = self.character(
            2,
            "Rival",
            self.config.opponent_race,
            self.config.opponent_class,
        )?;

        let log = self.simulator().resolve_pvp_with(
            &hero.to_combatant(),
            &rival.to_combatant(),
            &mut self.rng,
        )?;
        hero.record.record_fight(log.winner == Side::Left);
        rival.record.record_fight(log.winner == Side::Right);

        Ok(json!({
            "fight": FightReport::from(&log),
            "records": { "player1": hero.record, "player2": rival.record },
        }))
    }

    fn run_quest(&mut self) -> Result<Value> {
        let quest = self.quest()?;
        let mut hero = self.hero()?;
        let simulator = self.simulator();

        let (log, settlement) = run_quest(
            &mut hero,
            &quest,
            &simulator,
            &self.content.tables,
            &self.content.config,
            &mut self.rng,
        )?;

        Ok(json!({
            "quest": quest,
            "fight": FightReport::from(&log),
            "settlement": settlement,
            "hero": hero,
        }))
    }

    fn run_skirmish(&mut self) -> Result<Value> {
        let hero = self.hero()?;
        let monster = self
            .content
            .tables
            .monsters
            .spawn(self.config.level, &mut self.rng)
            .with_extended(hero.extended);

        let log = self
            .simulator()
            .resolve_skirmish(&hero.to_combatant(), &monster, &mut self.rng)?;
        Ok(json!({ "fight": FightReport::from(&log) }))
    }

    fn run_board(&mut self) -> Result<Value> {
        let board = match &self.config.board {
            Some(name) => self.content.load_board(name)?,
            None => {
                let rules = &self.content.config.board;
                Board::generate(
                    rules.length,
                    rules.weights,
                    rules.level.max(self.config.level),
                    &self.content.tables,
                    &mut self.rng,
                )
            }
        };
        tracing::info!("Board of {} tiles, {} enemies", board.len(), board.enemy_count());

        let hero = self.hero()?;
        let mut game = arena_core::BoardGame::new(hero, board, self.content.config.clone())
            .with_archetypes(self.content.tables.archetypes.clone());

        let mut turns = Vec::new();
        while !game.is_finished() {
            turns.push(game.play_turn(&mut self.rng)?);
        }

        let summary = game.summary();
        Ok(json!({
            "turns": turns,
            "summary": summary,
            "hero": game.into_hero(),
        }))
    }

    fn run_event(&mut self) -> Result<Value> {
        let mut hero = self.hero()?;
        let event = generate_event(None, self.config.level, &self.content.tables, &mut self.rng);
        let effect = event.apply_passive(&mut hero);

        let fight = match &event {
            GameEvent::Combat { monster } => {
                let log = self.simulator().resolve_quest_with(
                    &hero.to_combatant(),
                    monster,
                    &mut self.rng,
                )?;
                commit_fight(&mut hero, &log, Side::Left, self.content.config.quest.health_policy);
                hero.record.record_fight(log.winner == Side::Left);
                Some(FightReport::from(&log))
            }
            _ => None,
        };

        Ok(json!({
            "event": event,
            "effect": effect,
            "fight": fight,
            "hero": hero,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn session(mode: SessionMode, seed: u64) -> Session {
        let config = ClientConfig {
            mode,
            seed,
            ..ClientConfig::default()
        };
        Session::new(config).unwrap()
    }

    fn shipped_data() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
    }

    #[test]
    fn builder_requires_config() {
        assert!(SessionBuilder::new().build().is_err());
    }

    #[test]
    fn pvp_session_reports_both_players() {
        let report = session(SessionMode::Pvp, 3).run().unwrap();
        assert_eq!(report["fight"]["mode"], "PVP");
        assert_eq!(report["fight"]["players"]["player1"]["name"], "Hero");

        let wins = report["records"]["player1"]["battles_won"].as_u64().unwrap()
            + report["records"]["player2"]["battles_won"].as_u64().unwrap();
        assert_eq!(wins, 1);
    }

    #[test]
    fn quest_session_settles_level_one_quest() {
        let report = session(SessionMode::Quest, 11).run().unwrap();
        assert_eq!(report["quest"]["id"], 1);
        assert_eq!(report["fight"]["monster"]["name"], "Goblin");
        assert!(report["settlement"]["victory"].is_boolean());
    }

    #[test]
    fn unknown_quest_is_an_error() {
        let config = ClientConfig {
            quest_id: Some(999),
            ..ClientConfig::default()
        };
        let error = Session::new(config).unwrap().run().unwrap_err();
        assert!(error.to_string().contains("999"));
    }

    #[test]
    fn board_session_runs_to_a_terminal_state() {
        let report = session(SessionMode::Board, 5).run().unwrap();
        let summary = &report["summary"];
        assert!(summary["is_completed"] == true || summary["is_game_over"] == true);
        assert_eq!(
            report["turns"].as_array().unwrap().len() as u64,
            summary["turns"].as_u64().unwrap()
        );
    }

    #[test]
    fn named_board_needs_a_data_dir() {
        let config = ClientConfig {
            mode: SessionMode::Board,
            board: Some("meadow".into()),
            ..ClientConfig::default()
        };
        assert!(Session::new(config).unwrap().run().is_err());
    }

    #[test]
    fn shipped_board_loads_through_the_session() {
        let config = ClientConfig {
            mode: SessionMode::Board,
            board: Some("meadow".into()),
            data_dir: Some(shipped_data()),
            seed: 8,
            ..ClientConfig::default()
        };
        let mut session = Session::new(config).unwrap();
        assert_eq!(session.content().quests.len(), 7);
        let report = session.run().unwrap();
        assert!(report["summary"]["position"].as_u64().unwrap() <= 20);
    }

    #[test]
    fn level_raises_the_hero() {
        let config = ClientConfig {
            mode: SessionMode::Event,
            level: 4,
            ..ClientConfig::default()
        };
        let report = Session::new(config).unwrap().run().unwrap();
        assert_eq!(report["hero"]["level"], 4);
    }

    #[test]
    fn sessions_are_reproducible() {
        for mode in [
            SessionMode::Pvp,
            SessionMode::Quest,
            SessionMode::Skirmish,
            SessionMode::Board,
            SessionMode::Event,
        ] {
            let first = session(mode, 21).run().unwrap();
            let second = session(mode, 21).run().unwrap();
            assert_eq!(first, second, "{mode} diverged");
        }
    }
}
