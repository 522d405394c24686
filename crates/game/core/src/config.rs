use crate::combat::{DamageRule, DamageVariance};
use crate::error::{ErrorSeverity, GameError};

/// Knobs for the fight simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Damage formula for both sides of a PvP fight.
    pub pvp_damage: DamageRule,
    /// Hero to monster damage in quests.
    pub hero_damage: DamageRule,
    /// Monster to hero damage in quests.
    pub monster_damage: DamageRule,
    /// Rounds before the fight is judged on remaining health.
    /// `None` falls back to [`GameConfig::ROUND_SAFETY_LIMIT`].
    pub max_rounds: Option<u32>,
    /// Crit and spread used by the `*_with` entry points.
    pub variance: Option<DamageVariance>,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            pvp_damage: DamageRule::FullDefense,
            hero_damage: DamageRule::IgnoreDefense,
            monster_damage: DamageRule::FullDefense,
            max_rounds: None,
            variance: None,
        }
    }
}

impl CombatRules {
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    #[must_use]
    pub fn with_variance(mut self, variance: DamageVariance) -> Self {
        self.variance = Some(variance);
        self
    }

    #[must_use]
    pub fn with_pvp_damage(mut self, rule: DamageRule) -> Self {
        self.pvp_damage = rule;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionRules {
    /// Level `L` is left once experience reaches `L * xp_per_level`.
    pub xp_per_level: u32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            xp_per_level: GameConfig::DEFAULT_XP_PER_LEVEL,
        }
    }
}

/// Whether a fight's health loss sticks to the character afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HealthPolicy {
    /// Friendly fight: pre-fight health is kept.
    Restore,
    /// Final health from the log is written back.
    #[default]
    Commit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestRules {
    /// Share of max health a defeated hero is left with.
    pub loss_recovery_percent: u32,
    /// Applied to the hero after a won quest fight.
    pub health_policy: HealthPolicy,
}

impl Default for QuestRules {
    fn default() -> Self {
        Self {
            loss_recovery_percent: GameConfig::DEFAULT_LOSS_RECOVERY_PERCENT,
            health_policy: HealthPolicy::Commit,
        }
    }
}

/// Relative odds of each generated tile kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileWeights {
    pub empty: u32,
    pub item: u32,
    pub enemy: u32,
}

impl TileWeights {
    pub const fn new(empty: u32, item: u32, enemy: u32) -> Self {
        Self { empty, item, enemy }
    }

    pub const fn as_array(&self) -> [u32; 3] {
        [self.empty, self.item, self.enemy]
    }

    pub const fn total(&self) -> u64 {
        self.empty as u64 + self.item as u64 + self.enemy as u64
    }
}

impl Default for TileWeights {
    fn default() -> Self {
        Self::new(50, 25, 25)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardRules {
    pub length: u32,
    pub weights: TileWeights,
    /// Level used to spawn enemies and roll items.
    pub level: u32,
    /// Experience for reaching the last tile.
    pub completion_xp: u32,
    /// Experience for each enemy tile cleared.
    pub enemy_xp: u32,
}

impl Default for BoardRules {
    fn default() -> Self {
        Self {
            length: GameConfig::DEFAULT_BOARD_LENGTH,
            weights: TileWeights::default(),
            level: 1,
            completion_xp: GameConfig::DEFAULT_COMPLETION_XP,
            enemy_xp: GameConfig::DEFAULT_ENEMY_XP,
        }
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub combat: CombatRules,
    pub progression: ProgressionRules,
    pub quest: QuestRules,
    pub board: BoardRules,
    /// Slot capacity of newly created inventories.
    pub inventory_slots: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Initiative blow plus retaliation.
    pub const MAX_BLOWS_PER_ROUND: usize = 2;
    /// Round bound applied when `max_rounds` is unset.
    pub const ROUND_SAFETY_LIMIT: u32 = 1_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INVENTORY_SLOTS: usize = 20;
    pub const DEFAULT_XP_PER_LEVEL: u32 = 100;
    pub const DEFAULT_LOSS_RECOVERY_PERCENT: u32 = 25;
    pub const DEFAULT_BOARD_LENGTH: u32 = 20;
    pub const DEFAULT_COMPLETION_XP: u32 = 100;
    pub const DEFAULT_ENEMY_XP: u32 = 10;

    pub fn new() -> Self {
        Self {
            combat: CombatRules::default(),
            progression: ProgressionRules::default(),
            quest: QuestRules::default(),
            board: BoardRules::default(),
            inventory_slots: Self::DEFAULT_INVENTORY_SLOTS,
        }
    }

    /// Reject settings the rules cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.max_rounds == Some(0) {
            return Err(ConfigError::ZeroRoundLimit);
        }
        if self.progression.xp_per_level == 0 {
            return Err(ConfigError::ZeroXpPerLevel);
        }
        if self.quest.loss_recovery_percent > 100 {
            return Err(ConfigError::RecoveryAbove100(
                self.quest.loss_recovery_percent,
            ));
        }
        if self.board.length == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board.weights.total() == 0 {
            return Err(ConfigError::ZeroTileWeights);
        }
        if self.inventory_slots == 0 {
            return Err(ConfigError::NoInventorySlots);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("combat.max_rounds must be at least 1")]
    ZeroRoundLimit,

    #[error("progression.xp_per_level must be at least 1")]
    ZeroXpPerLevel,

    #[error("quest.loss_recovery_percent must be at most 100, got {0}")]
    RecoveryAbove100(u32),

    #[error("board.length must be at least 1")]
    EmptyBoard,

    #[error("board.weights must not all be zero")]
    ZeroTileWeights,

    #[error("inventory_slots must be at least 1")]
    NoInventorySlots,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroRoundLimit => "CONFIG_ZERO_ROUND_LIMIT",
            Self::ZeroXpPerLevel => "CONFIG_ZERO_XP_PER_LEVEL",
            Self::RecoveryAbove100(_) => "CONFIG_RECOVERY_ABOVE_100",
            Self::EmptyBoard => "CONFIG_EMPTY_BOARD",
            Self::ZeroTileWeights => "CONFIG_ZERO_TILE_WEIGHTS",
            Self::NoInventorySlots => "CONFIG_NO_INVENTORY_SLOTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_round_limit_is_rejected() {
        let mut config = GameConfig::default();
        config.combat.max_rounds = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroRoundLimit));
    }

    #[test]
    fn empty_board_is_rejected() {
        let mut config = GameConfig::default();
        config.board.length = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyBoard));

        let mut config = GameConfig::default();
        config.board.weights = TileWeights::new(0, 0, 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTileWeights));
    }
}
