//! Data-driven race × class tables.
//!
//! Starting stats are computed from a base line scaled by a race multiplier
//! and a class multiplier (percentages), plus extended-stat contributions from
//! both. Level-up growth is a per-class row. Adding a race or a class is a
//! data change, not a new type.

use core::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::stats::ExtendedStats;

/// Playable and monster races.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Race {
    #[default]
    Human,
    Elf,
    Dwarf,
    Orc,
    Vampire,
    Werewolf,
}

/// Character classes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Class {
    #[default]
    Warrior,
    Mage,
    Archer,
    Rogue,
}

/// Percent multipliers (100 = ×1.0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatMultipliers {
    pub life: u32,
    pub attack: u32,
    pub defense: u32,
}

impl StatMultipliers {
    pub const NEUTRAL: Self = Self::new(100, 100, 100);

    pub const fn new(life: u32, attack: u32, defense: u32) -> Self {
        Self {
            life,
            attack,
            defense,
        }
    }
}

/// Flat stat triple used for base lines and level-up growth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatLine {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
}

impl StatLine {
    pub const fn new(health: u32, attack: u32, defense: u32) -> Self {
        Self {
            health,
            attack,
            defense,
        }
    }

    /// Multiply every field by `times` (saturating).
    pub const fn times(&self, times: u32) -> Self {
        Self {
            health: self.health.saturating_mul(times),
            attack: self.attack.saturating_mul(times),
            defense: self.defense.saturating_mul(times),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceProfile {
    pub race: Race,
    pub multipliers: StatMultipliers,
    pub extended: ExtendedStats,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassProfile {
    pub class: Class,
    pub multipliers: StatMultipliers,
    pub extended: ExtendedStats,
    /// Growth per level; `None` falls back to the table default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub level_up: Option<StatLine>,
}

/// Starting stats resolved for one race/class pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Archetype {
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub extended: ExtendedStats,
}

/// Errors raised when a race or class cannot be resolved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArchetypeError {
    #[error("unknown race: {0}")]
    UnknownRace(String),

    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("no table row for race {0}")]
    MissingRace(Race),

    #[error("no table row for class {0}")]
    MissingClass(Class),
}

impl GameError for ArchetypeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownRace(_) | Self::UnknownClass(_) => ErrorSeverity::Validation,
            Self::MissingRace(_) | Self::MissingClass(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownRace(_) => "ARCHETYPE_UNKNOWN_RACE",
            Self::UnknownClass(_) => "ARCHETYPE_UNKNOWN_CLASS",
            Self::MissingRace(_) => "ARCHETYPE_MISSING_RACE",
            Self::MissingClass(_) => "ARCHETYPE_MISSING_CLASS",
        }
    }
}

impl Race {
    /// Parse a race name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, ArchetypeError> {
        Self::from_str(name.trim()).map_err(|_| ArchetypeError::UnknownRace(name.to_owned()))
    }
}

impl Class {
    /// Parse a class name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, ArchetypeError> {
        Self::from_str(name.trim()).map_err(|_| ArchetypeError::UnknownClass(name.to_owned()))
    }
}

/// Race × class stat table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeTable {
    pub base: StatLine,
    pub default_level_up: StatLine,
    pub races: Vec<RaceProfile>,
    pub classes: Vec<ClassProfile>,
}

impl ArchetypeTable {
    /// Built-in table used when no content directory is supplied.
    pub fn standard() -> Self {
        let race = |race, multipliers, (speed, agility, chance)| RaceProfile {
            race,
            multipliers,
            extended: ExtendedStats::new(speed, agility, chance),
        };
        let class = |class, multipliers, (speed, agility, chance), level_up| ClassProfile {
            class,
            multipliers,
            extended: ExtendedStats::new(speed, agility, chance),
            level_up,
        };

        Self {
            base: StatLine::new(100, 20, 10),
            default_level_up: StatLine::new(8, 2, 2),
            races: vec![
                race(Race::Human, StatMultipliers::NEUTRAL, (5, 5, 5)),
                race(Race::Elf, StatMultipliers::new(90, 130, 110), (5, 10, 5)),
                race(Race::Dwarf, StatMultipliers::new(120, 100, 120), (5, 10, 10)),
                race(Race::Orc, StatMultipliers::new(125, 120, 90), (10, 5, 5)),
                race(Race::Vampire, StatMultipliers::new(120, 110, 90), (10, 5, 5)),
                race(Race::Werewolf, StatMultipliers::new(130, 120, 80), (10, 10, 0)),
            ],
            classes: vec![
                class(
                    Class::Warrior,
                    StatMultipliers::new(130, 120, 120),
                    (5, 5, 5),
                    Some(StatLine::new(10, 3, 2)),
                ),
                class(
                    Class::Mage,
                    StatMultipliers::new(80, 150, 90),
                    (0, 0, 10),
                    Some(StatLine::new(5, 5, 1)),
                ),
                class(Class::Archer, StatMultipliers::new(100, 110, 100), (5, 10, 5), None),
                class(Class::Rogue, StatMultipliers::new(90, 130, 80), (10, 10, 10), None),
            ],
        }
    }

    pub fn race(&self, race: Race) -> Option<&RaceProfile> {
        self.races.iter().find(|profile| profile.race == race)
    }

    pub fn class(&self, class: Class) -> Option<&ClassProfile> {
        self.classes.iter().find(|profile| profile.class == class)
    }

    /// Resolve starting stats for a race/class pair.
    ///
    /// `stat = base × race% × class% / 10_000`, extended stats are summed.
    pub fn archetype(&self, race: Race, class: Class) -> Result<Archetype, ArchetypeError> {
        let race_row = self.race(race).ok_or(ArchetypeError::MissingRace(race))?;
        let class_row = self.class(class).ok_or(ArchetypeError::MissingClass(class))?;

        let scale = |base: u32, race_pct: u32, class_pct: u32| -> u32 {
            let scaled = base as u64 * race_pct as u64 * class_pct as u64 / 10_000;
            scaled.min(u32::MAX as u64) as u32
        };
        let (rm, cm) = (race_row.multipliers, class_row.multipliers);

        Ok(Archetype {
            // At least one hit point so a fresh character can always fight.
            max_health: scale(self.base.health, rm.life, cm.life).max(1),
            attack: scale(self.base.attack, rm.attack, cm.attack),
            defense: scale(self.base.defense, rm.defense, cm.defense),
            extended: race_row.extended.combine(&class_row.extended),
        })
    }

    /// Per-level growth for a class.
    pub fn level_up(&self, class: Class) -> StatLine {
        self.class(class)
            .and_then(|row| row.level_up)
            .unwrap_or(self.default_level_up)
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn werewolf_warrior_matches_multiplier_product() {
        let table = ArchetypeTable::standard();
        let archetype = table.archetype(Race::Werewolf, Class::Warrior).unwrap();
        // 100 × 1.3 × 1.3 = 169, 20 × 1.2 × 1.2 = 28.8, 10 × 0.8 × 1.2 = 9.6
        assert_eq!(archetype.max_health, 169);
        assert_eq!(archetype.attack, 28);
        assert_eq!(archetype.defense, 9);
        assert_eq!(archetype.extended, ExtendedStats::new(15, 15, 5));
    }

    #[test]
    fn every_pair_in_standard_table_resolves() {
        let table = ArchetypeTable::standard();
        for race in Race::iter() {
            for class in Class::iter() {
                let archetype = table.archetype(race, class).unwrap();
                assert!(archetype.max_health > 0, "{race}/{class}");
            }
        }
    }

    #[test]
    fn level_up_falls_back_to_default_row() {
        let table = ArchetypeTable::standard();
        assert_eq!(table.level_up(Class::Warrior), StatLine::new(10, 3, 2));
        assert_eq!(table.level_up(Class::Mage), StatLine::new(5, 5, 1));
        assert_eq!(table.level_up(Class::Rogue), StatLine::new(8, 2, 2));
    }

    #[test]
    fn missing_rows_are_reported() {
        let mut table = ArchetypeTable::standard();
        table.races.retain(|row| row.race != Race::Orc);
        assert_eq!(
            table.archetype(Race::Orc, Class::Mage),
            Err(ArchetypeError::MissingRace(Race::Orc))
        );
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Race::parse("WEREWOLF").unwrap(), Race::Werewolf);
        assert_eq!(Class::parse(" mage ").unwrap(), Class::Mage);
        assert_eq!(
            Class::parse("bard"),
            Err(ArchetypeError::UnknownClass("bard".into()))
        );
        assert_eq!(Race::Elf.to_string(), "elf");
    }
}
