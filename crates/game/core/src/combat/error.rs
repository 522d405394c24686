use crate::error::{ErrorSeverity, GameError};

/// Errors raised before a fight starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// A combatant entered the fight already defeated.
    #[error("combatant {name} cannot fight with {health} health")]
    InvalidCombatantState { name: String, health: u32 },

    /// `max_rounds` was configured as zero.
    #[error("round limit must be at least 1")]
    InvalidRoundLimit,
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCombatantState { .. } => "COMBAT_INVALID_COMBATANT_STATE",
            Self::InvalidRoundLimit => "COMBAT_INVALID_ROUND_LIMIT",
        }
    }
}
