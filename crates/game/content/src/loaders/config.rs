//! Game configuration loader.

use std::path::Path;

use arena_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and keys fall back to [`GameConfig::default`]. The
    /// result is validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate config TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{DamageRule, HealthPolicy};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [combat]
            pvp_damage = "half_defense"
            max_rounds = 30

            [quest]
            health_policy = "restore"
            "#,
        )
        .unwrap();

        assert_eq!(config.combat.pvp_damage, DamageRule::HalfDefense);
        assert_eq!(config.combat.max_rounds, Some(30));
        assert_eq!(config.combat.hero_damage, DamageRule::IgnoreDefense);
        assert_eq!(config.quest.health_policy, HealthPolicy::Restore);
        assert_eq!(config.board, GameConfig::default().board);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[combat]\nmax_rounds = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_rounds"), "{err}");
    }
}
