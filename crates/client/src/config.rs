//! Session configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use arena_core::env::{Class, Race};

/// Which rule set a session exercises.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SessionMode {
    Pvp,
    #[default]
    Quest,
    Skirmish,
    Board,
    Event,
}

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub mode: SessionMode,
    pub seed: u64,
    /// Content directory; built-in tables are used when unset.
    pub data_dir: Option<PathBuf>,
    /// Hero level, quest level and event difficulty.
    pub level: u32,
    pub race: Race,
    pub class: Class,
    pub opponent_race: Race,
    pub opponent_class: Class,
    /// Quest id from the catalog; defaults to the first quest at `level`.
    pub quest_id: Option<u32>,
    /// Board file under `boards/`; a board is generated when unset.
    pub board: Option<String>,
    /// Also write logs to `<log_dir>/arena.log`.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::default(),
            seed: 0,
            data_dir: None,
            level: 1,
            race: Race::Human,
            class: Class::Warrior,
            opponent_race: Race::Orc,
            opponent_class: Class::Rogue,
            quest_id: None,
            board: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_MODE` - `pvp`, `quest`, `skirmish`, `board` or `event` (default: quest)
    /// - `ARENA_SEED` - RNG seed (default: 0)
    /// - `ARENA_DATA_DIR` - content directory (default: built-in tables)
    /// - `ARENA_LEVEL` - hero level and encounter difficulty (default: 1)
    /// - `ARENA_RACE`, `ARENA_CLASS` - hero archetype (default: human warrior)
    /// - `ARENA_OPPONENT_RACE`, `ARENA_OPPONENT_CLASS` - PvP opponent (default: orc rogue)
    /// - `ARENA_QUEST` - quest id
    /// - `ARENA_BOARD` - board name under `boards/`
    /// - `ARENA_LOG_DIR` - directory for the log file
    ///
    /// Unset or empty variables keep their defaults. A variable that is set
    /// but does not parse is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(mode) = parse_var::<SessionMode>("ARENA_MODE", read("ARENA_MODE"))? {
            config.mode = mode;
        }
        if let Some(seed) = parse_var::<u64>("ARENA_SEED", read("ARENA_SEED"))? {
            config.seed = seed;
        }
        if let Some(level) = parse_var::<u32>("ARENA_LEVEL", read("ARENA_LEVEL"))? {
            config.level = level.max(1);
        }
        if let Some(race) = read("ARENA_RACE") {
            config.race = Race::parse(&race).context("invalid ARENA_RACE")?;
        }
        if let Some(class) = read("ARENA_CLASS") {
            config.class = Class::parse(&class).context("invalid ARENA_CLASS")?;
        }
        if let Some(race) = read("ARENA_OPPONENT_RACE") {
            config.opponent_race = Race::parse(&race).context("invalid ARENA_OPPONENT_RACE")?;
        }
        if let Some(class) = read("ARENA_OPPONENT_CLASS") {
            config.opponent_class = Class::parse(&class).context("invalid ARENA_OPPONENT_CLASS")?;
        }
        config.quest_id = parse_var::<u32>("ARENA_QUEST", read("ARENA_QUEST"))?;
        config.data_dir = read("ARENA_DATA_DIR").map(PathBuf::from);
        config.board = read("ARENA_BOARD");
        config.log_dir = read("ARENA_LOG_DIR").map(PathBuf::from);

        Ok(config)
    }
}

fn parse_var<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: std::str::FromStr,
{
    match value {
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => bail!("invalid {key}: {value:?}"),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use arena_core::env::ArchetypeError;

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!("PVP".parse::<SessionMode>().unwrap(), SessionMode::Pvp);
        assert_eq!("board".parse::<SessionMode>().unwrap(), SessionMode::Board);
        assert!("raid".parse::<SessionMode>().is_err());
    }

    fn lookup(vars: &[(&str, &str)]) -> Result<ClientConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = lookup(&[("ARENA_BOARD", "")]).unwrap();
        assert_eq!(config.mode, SessionMode::Quest);
        assert_eq!((config.race, config.class), (Race::Human, Class::Warrior));
        assert_eq!(config.board, None);
    }

    #[test]
    fn variables_override_defaults() {
        let config = lookup(&[
            ("ARENA_MODE", "Board"),
            ("ARENA_SEED", "77"),
            ("ARENA_LEVEL", "0"),
            ("ARENA_RACE", " ELF "),
            ("ARENA_CLASS", "archer"),
            ("ARENA_BOARD", "meadow"),
        ])
        .unwrap();
        assert_eq!(config.mode, SessionMode::Board);
        assert_eq!(config.seed, 77);
        assert_eq!(config.level, 1);
        assert_eq!((config.race, config.class), (Race::Elf, Class::Archer));
        assert_eq!(config.board.as_deref(), Some("meadow"));
    }

    #[test]
    fn unknown_race_is_rejected() {
        let error = lookup(&[("ARENA_RACE", "elfe")]).unwrap_err();
        assert_eq!(
            error.downcast_ref::<ArchetypeError>(),
            Some(&ArchetypeError::UnknownRace("elfe".into()))
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(lookup(&[("ARENA_MODE", "raid")]).is_err());
        assert!(lookup(&[("ARENA_CLASS", "bard")]).is_err());
        assert!(lookup(&[("ARENA_SEED", "-3")]).is_err());
    }
}
