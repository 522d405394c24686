//! Quest fights and what they leave behind on the character.

use crate::combat::{CombatError, CombatSimulator, FightLog, Side};
use crate::config::{GameConfig, HealthPolicy};
use crate::env::{ItemDefinition, RandomSource, Tables};
use crate::error::{ErrorSeverity, GameError};
use crate::progression::{LevelUpResult, apply_experience};
use crate::state::CharacterSheet;

/// A quest offered to characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestSpec {
    pub id: u32,
    /// Selects the monster from the roster.
    pub level: u32,
    pub experience_reward: u32,
    pub gold_reward: u32,
}

impl QuestSpec {
    pub const fn new(id: u32, level: u32, experience_reward: u32, gold_reward: u32) -> Self {
        Self {
            id,
            level,
            experience_reward,
            gold_reward,
        }
    }
}

/// Outcome of settling a quest fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestSettlement {
    pub quest_id: u32,
    pub victory: bool,
    pub experience: u32,
    pub gold: u32,
    pub level_up: Option<LevelUpResult>,
    /// Reward rolled on victory.
    pub item: Option<ItemDefinition>,
    /// `false` when the reward was dropped because the bag was full.
    pub item_stored: bool,
    pub health_after: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    #[error("quest {0} was already completed")]
    AlreadyCompleted(u32),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl GameError for QuestError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyCompleted(_) => ErrorSeverity::Validation,
            Self::Combat(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyCompleted(_) => "QUEST_ALREADY_COMPLETED",
            Self::Combat(err) => err.error_code(),
        }
    }
}

/// Write a fight's health outcome back to the sheet.
///
/// `Restore` leaves the sheet untouched; `Commit` copies the final health of
/// `side`, which may be zero. Returns the sheet's health afterwards.
pub fn commit_fight(
    sheet: &mut CharacterSheet,
    log: &FightLog,
    side: Side,
    policy: HealthPolicy,
) -> u32 {
    if policy == HealthPolicy::Commit {
        sheet.health = log.final_health(side).min(sheet.max_health);
    }
    sheet.health
}

/// Apply the result of a quest fight where the character fought on the left.
///
/// Victory commits health per `config.quest.health_policy`, then grants
/// experience, gold and a random reward item. A full bag drops the item
/// with a warning. Defeat leaves the character at
/// `max(1, max_health * loss_recovery_percent / 100)` health.
pub fn settle_quest(
    sheet: &mut CharacterSheet,
    log: &FightLog,
    quest: &QuestSpec,
    tables: &Tables,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) -> QuestSettlement {
    let victory = log.winner == Side::Left;
    sheet.record.record_fight(victory);

    if !victory {
        let recovered = sheet.max_health as u64 * config.quest.loss_recovery_percent as u64 / 100;
        sheet.health = (recovered as u32).max(1).min(sheet.max_health.max(1));
        tracing::info!(
            "{} lost quest {} and recovers to {} health",
            sheet.name,
            quest.id,
            sheet.health
        );
        return QuestSettlement {
            quest_id: quest.id,
            victory,
            experience: 0,
            gold: 0,
            level_up: None,
            item: None,
            item_stored: false,
            health_after: sheet.health,
        };
    }

    commit_fight(sheet, log, Side::Left, config.quest.health_policy);
    let level_up = apply_experience(
        sheet,
        quest.experience_reward,
        &tables.archetypes,
        &config.progression,
    );
    sheet.gold = sheet.gold.saturating_add(quest.gold_reward);
    sheet.record.quests_completed = sheet.record.quests_completed.saturating_add(1);
    sheet.record.monsters_defeated = sheet.record.monsters_defeated.saturating_add(1);
    if !sheet.has_completed(quest.id) {
        sheet.completed_quests.push(quest.id);
    }

    let item = tables.rewards.generate(quest.level, None, rng);
    let item_stored = match sheet.inventory.add(item.clone(), 1) {
        Ok(()) => {
            sheet.record.items_collected = sheet.record.items_collected.saturating_add(1);
            true
        }
        Err(err) => {
            tracing::warn!("{} dropped reward {}: {err}", sheet.name, item.name);
            false
        }
    };

    QuestSettlement {
        quest_id: quest.id,
        victory,
        experience: quest.experience_reward,
        gold: quest.gold_reward,
        level_up: level_up.leveled_up().then_some(level_up),
        item: Some(item),
        item_stored,
        health_after: sheet.health,
    }
}

/// Spawn the quest monster, fight it and settle the result.
///
/// # Errors
///
/// - [`QuestError::AlreadyCompleted`] if the character cleared the quest before
/// - [`QuestError::Combat`] if the fight could not start
pub fn run_quest(
    sheet: &mut CharacterSheet,
    quest: &QuestSpec,
    simulator: &CombatSimulator,
    tables: &Tables,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) -> Result<(FightLog, QuestSettlement), QuestError> {
    if sheet.has_completed(quest.id) {
        return Err(QuestError::AlreadyCompleted(quest.id));
    }

    let monster = tables.monsters.spawn(quest.level, rng);
    let log = simulator.resolve_quest_with(&sheet.to_combatant(), &monster, rng)?;
    let settlement = settle_quest(sheet, &log, quest, tables, config, rng);
    Ok((log, settlement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ArchetypeTable, Class, Race, SeededRng};
    use crate::state::{CharacterId, Inventory};
    use crate::stats::Combatant;

    fn hero() -> CharacterSheet {
        CharacterSheet::create(
            CharacterId(3),
            "Bram",
            Race::Dwarf,
            Class::Warrior,
            &ArchetypeTable::standard(),
        )
        .unwrap()
    }

    fn fight(hero: &CharacterSheet, monster: Combatant) -> FightLog {
        CombatSimulator::default()
            .resolve_quest(&hero.to_combatant(), &monster)
            .unwrap()
    }

    #[test]
    fn victory_grants_rewards() {
        let mut sheet = hero();
        let log = fight(&sheet, Combatant::new("Rat", 5, 1, 0));
        let quest = QuestSpec::new(1, 1, 120, 30);

        let settlement = settle_quest(
            &mut sheet,
            &log,
            &quest,
            &Tables::standard(),
            &GameConfig::default(),
            &mut SeededRng::new(1),
        );

        assert!(settlement.victory);
        assert!(settlement.item_stored);
        assert_eq!(sheet.gold, 30);
        assert_eq!(sheet.level, 2);
        assert_eq!(sheet.inventory.slots().len(), 1);
        assert!(sheet.has_completed(1));
        assert_eq!(sheet.record.battles_won, 1);
    }

    #[test]
    fn full_bag_drops_the_reward() {
        let mut sheet = hero().with_inventory(Inventory::new(0));
        let log = fight(&sheet, Combatant::new("Rat", 5, 1, 0));

        let settlement = settle_quest(
            &mut sheet,
            &log,
            &QuestSpec::new(2, 1, 10, 0),
            &Tables::standard(),
            &GameConfig::default(),
            &mut SeededRng::new(2),
        );

        assert!(settlement.victory);
        assert!(settlement.item.is_some());
        assert!(!settlement.item_stored);
        assert!(sheet.inventory.is_empty());
    }

    #[test]
    fn defeat_leaves_a_quarter_of_max_health() {
        let mut sheet = hero();
        let log = fight(&sheet, Combatant::new("Titan", 10_000, 500, 0));
        assert_eq!(log.winner, Side::Right);

        let settlement = settle_quest(
            &mut sheet,
            &log,
            &QuestSpec::new(3, 10, 500, 500),
            &Tables::standard(),
            &GameConfig::default(),
            &mut SeededRng::new(3),
        );

        assert!(!settlement.victory);
        assert_eq!(sheet.health, (sheet.max_health / 4).max(1));
        assert_eq!((sheet.gold, sheet.experience), (0, 0));
        assert_eq!(sheet.record.battles_lost, 1);
    }

    #[test]
    fn restore_policy_keeps_pre_fight_health() {
        let mut sheet = hero();
        let log = fight(&sheet, Combatant::new("Wolf", 30, 40, 0));
        let before = sheet.health;

        commit_fight(&mut sheet, &log, Side::Left, HealthPolicy::Restore);
        assert_eq!(sheet.health, before);

        commit_fight(&mut sheet, &log, Side::Left, HealthPolicy::Commit);
        assert_eq!(sheet.health, log.final_health(Side::Left));
    }

    #[test]
    fn completed_quests_cannot_be_repeated() {
        let mut sheet = hero();
        sheet.completed_quests.push(9);
        let err = run_quest(
            &mut sheet,
            &QuestSpec::new(9, 1, 10, 10),
            &CombatSimulator::default(),
            &Tables::standard(),
            &GameConfig::default(),
            &mut SeededRng::new(4),
        )
        .unwrap_err();
        assert_eq!(err, QuestError::AlreadyCompleted(9));
    }
}
