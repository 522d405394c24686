//! The data directory shipped with the repository must load cleanly and
//! agree with the built-in tables.

use std::fs;
use std::path::PathBuf;

use arena_content::{ContentFactory, MonsterLoader, QuestLoader, TablesLoader};
use arena_core::board::TileKind;
use arena_core::{ArchetypeTable, GameConfig, MonsterRoster, RewardTable};

fn factory() -> ContentFactory {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data");
    ContentFactory::new(data)
}

#[test]
fn shipped_config_matches_defaults() {
    let config = factory().load_config().unwrap();
    assert_eq!(config.combat.max_rounds, Some(200));

    let defaults = GameConfig::default();
    assert_eq!(config.progression, defaults.progression);
    assert_eq!(config.quest, defaults.quest);
    assert_eq!(config.board, defaults.board);
    assert_eq!(config.inventory_slots, defaults.inventory_slots);
}

#[test]
fn shipped_tables_match_builtins() {
    let tables = factory().load_tables().unwrap();
    assert_eq!(tables.archetypes, ArchetypeTable::standard());
    assert_eq!(tables.monsters, MonsterRoster::standard());
    assert_eq!(tables.rewards, RewardTable::standard());
}

#[test]
fn quests_and_boards_load() {
    let factory = factory();
    let quests = factory.load_quests().unwrap();
    assert_eq!(quests.len(), 7);
    assert!(quests.windows(2).all(|pair| pair[0].level <= pair[1].level));

    let roster = factory.load_monsters().unwrap();
    let meadow = factory.load_board("meadow", &roster).unwrap();
    assert_eq!(meadow.len(), 20);
    assert_eq!(meadow.enemy_count(), 3);

    let gauntlet = factory.load_board("gauntlet", &roster).unwrap();
    assert!(matches!(
        gauntlet.tile(6),
        Some(TileKind::Enemy(enemy)) if enemy.name == "Arena Champion"
    ));
}

#[test]
fn incomplete_archetype_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archetypes.ron");
    fs::write(
        &path,
        r#"(
            base: (health: 100, attack: 20, defense: 10),
            default_level_up: (health: 8, attack: 2, defense: 2),
            races: [],
            classes: [],
        )"#,
    )
    .unwrap();

    let error = TablesLoader::load(&path).unwrap_err().to_string();
    assert!(error.contains("race"), "{error}");
}

#[test]
fn duplicate_quest_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quests.ron");
    fs::write(
        &path,
        r#"(quests: [
            (id: 1, level: 1, experience_reward: 10, gold_reward: 0),
            (id: 1, level: 2, experience_reward: 20, gold_reward: 0),
        ])"#,
    )
    .unwrap();

    assert!(QuestLoader::load(&path).is_err());
}

#[test]
fn healthless_monster_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monsters.ron");
    fs::write(
        &path,
        r#"(monsters: [(level: 1, name: "Ghost", health: 0, attack: 3)])"#,
    )
    .unwrap();

    let error = MonsterLoader::load(&path).unwrap_err().to_string();
    assert!(error.contains("Ghost"), "{error}");
}
