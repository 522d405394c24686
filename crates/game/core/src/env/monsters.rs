//! Monster roster used by quests, board enemies and random events.

use crate::env::RandomSource;
use crate::stats::Combatant;

/// Stat line for the monster guarding one quest level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub level: u32,
    pub name: String,
    pub health: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
}

impl MonsterTemplate {
    pub fn new(level: u32, name: impl Into<String>, health: u32, attack: u32) -> Self {
        Self {
            level,
            name: name.into(),
            health,
            attack,
            defense: 0,
        }
    }

    /// Template for levels the roster does not list.
    pub fn fallback(level: u32) -> Self {
        Self::new(
            level,
            format!("Level {level} Monster"),
            20u32.saturating_add(level.saturating_mul(10)),
            3u32.saturating_add(level.saturating_mul(2)),
        )
    }

    /// Snapshot with the template's exact stats.
    pub fn to_combatant(&self) -> Combatant {
        Combatant::new(&self.name, self.health.max(1), self.attack, self.defense)
    }
}

/// Level-indexed monster templates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterRoster {
    pub monsters: Vec<MonsterTemplate>,
    /// Maximum ± percentage applied to health and attack on spawn.
    #[cfg_attr(feature = "serde", serde(default = "MonsterRoster::default_variation"))]
    pub variation_percent: u32,
}

impl MonsterRoster {
    pub const DEFAULT_VARIATION_PERCENT: u32 = 10;

    #[cfg(feature = "serde")]
    fn default_variation() -> u32 {
        Self::DEFAULT_VARIATION_PERCENT
    }

    pub fn standard() -> Self {
        let monsters = [
            (1, "Goblin", 30, 5),
            (2, "Wild Wolf", 40, 8),
            (3, "Bandit", 50, 10),
            (4, "Ogre", 70, 12),
            (5, "Mountain Troll", 90, 15),
            (6, "Lesser Demon", 110, 18),
            (7, "Ice Dragon", 140, 22),
            (8, "Dark Lord", 180, 25),
            (9, "Behemoth", 220, 30),
            (10, "Ancestral Dragon", 300, 35),
        ]
        .into_iter()
        .map(|(level, name, health, attack)| MonsterTemplate::new(level, name, health, attack))
        .collect();

        Self {
            monsters,
            variation_percent: Self::DEFAULT_VARIATION_PERCENT,
        }
    }

    /// Template for a level, falling back to the scaling formula.
    pub fn template(&self, level: u32) -> MonsterTemplate {
        self.monsters
            .iter()
            .find(|template| template.level == level)
            .cloned()
            .unwrap_or_else(|| MonsterTemplate::fallback(level))
    }

    /// Spawn a monster for `level` with randomised health and attack.
    pub fn spawn(&self, level: u32, rng: &mut impl RandomSource) -> Combatant {
        let template = self.template(level);
        let spread = self.variation_percent.min(100);
        let mut vary = |value: u32| -> u32 {
            let percent = rng.range(100 - spread, 100 + spread);
            (value as u64 * percent as u64 / 100).min(u32::MAX as u64) as u32
        };

        let health = vary(template.health).max(1);
        let attack = vary(template.attack);
        Combatant::new(&template.name, health, attack, template.defense)
    }
}

impl Default for MonsterRoster {
    fn default() -> Self {
        Self::standard()
    }
}
