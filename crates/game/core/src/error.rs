//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (`CombatError`, `InventoryError`, `BoardError`, ...)
//! are defined next to the rules they guard. They all implement [`GameError`]
//! so callers can classify failures without matching every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed later or with other input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: inconsistent data that indicates a bug or bad content
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry after the situation changes.
    ///
    /// Examples: inventory full, board already finished
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: combatant already defeated, unknown race name
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: archetype table missing a row, empty board
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all arena-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_helpers() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }

    #[test]
    fn wrapped_errors_keep_their_classification() {
        use crate::board::BoardError;
        use crate::combat::CombatError;
        use crate::state::InventoryError;

        let board = BoardError::from(CombatError::InvalidRoundLimit);
        assert_eq!(board.error_code(), "COMBAT_INVALID_ROUND_LIMIT");
        assert_eq!(board.severity(), ErrorSeverity::Validation);

        assert!(
            InventoryError::InventoryFull { capacity: 2 }
                .severity()
                .is_recoverable()
        );
        assert!(BoardError::EmptyBoard.severity().is_internal());
    }
}
