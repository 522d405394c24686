//! Experience and level-ups.
//!
//! Level `L` is left once cumulative experience reaches `L * xp_per_level`,
//! so with the default of 100 a character reaches level 2 at 100 xp, level 3
//! at 200 xp and so on. One award may cross several thresholds.

use crate::config::ProgressionRules;
use crate::env::ArchetypeTable;
use crate::state::CharacterSheet;

/// What an experience award changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpResult {
    pub xp_gained: u32,
    pub previous_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
    pub health_gained: u32,
    pub attack_gained: u32,
    pub defense_gained: u32,
}

impl LevelUpResult {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Experience needed to leave `level`.
pub fn level_threshold(level: u32, rules: &ProgressionRules) -> u64 {
    level as u64 * rules.xp_per_level.max(1) as u64
}

/// Level reached with `experience`, never below `current`.
pub fn level_for(experience: u32, current: u32, rules: &ProgressionRules) -> u32 {
    let earned = experience / rules.xp_per_level.max(1);
    current.max(earned.saturating_add(1))
}

/// Award `xp` and apply every level-up it unlocks.
///
/// Each level adds the class growth row; any level-up restores health to
/// the new maximum. The sheet is updated in a single assignment.
pub fn apply_experience(
    sheet: &mut CharacterSheet,
    xp: u32,
    archetypes: &ArchetypeTable,
    rules: &ProgressionRules,
) -> LevelUpResult {
    let mut next = sheet.clone();
    next.level = next.level.max(1);
    next.experience = next.experience.saturating_add(xp);

    let previous_level = next.level;
    next.level = level_for(next.experience, previous_level, rules);
    let levels_gained = next.level - previous_level;

    let growth = archetypes.level_up(next.class).times(levels_gained);
    if levels_gained > 0 {
        next.max_health = next.max_health.saturating_add(growth.health);
        next.attack = next.attack.saturating_add(growth.attack);
        next.defense = next.defense.saturating_add(growth.defense);
        next.health = next.max_health;
        tracing::info!(
            "{} reached level {} ({} xp)",
            next.name,
            next.level,
            next.experience
        );
    }

    let result = LevelUpResult {
        xp_gained: xp,
        previous_level,
        new_level: next.level,
        levels_gained,
        health_gained: next.max_health - sheet.max_health,
        attack_gained: next.attack - sheet.attack,
        defense_gained: next.defense - sheet.defense,
    };
    *sheet = next;
    result
}
