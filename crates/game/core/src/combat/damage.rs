//! Damage formulas, variance and dodge mitigation.

use crate::env::RandomSource;

// ============================================================================
// Damage Rule
// ============================================================================

/// How much of the defender's defense is subtracted from an attack.
///
/// Every rule clamps at zero: `damage = max(attack - mitigation, 0)`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageRule {
    /// `attack - defense`
    #[default]
    FullDefense,
    /// `attack - defense / 2`
    HalfDefense,
    /// `attack - defense / 4`
    QuarterDefense,
    /// `attack`
    IgnoreDefense,
}

impl DamageRule {
    /// Portion of `defense` this rule subtracts.
    pub const fn mitigation(&self, defense: u32) -> u32 {
        match self {
            Self::FullDefense => defense,
            Self::HalfDefense => defense / 2,
            Self::QuarterDefense => defense / 4,
            Self::IgnoreDefense => 0,
        }
    }

    /// Damage dealt by `attack` against `defense`. Never negative.
    pub const fn apply(&self, attack: u32, defense: u32) -> u32 {
        attack.saturating_sub(self.mitigation(defense))
    }
}

// ============================================================================
// Variance
// ============================================================================

/// Random critical hits and damage spread layered over a [`DamageRule`].
///
/// # Formula
///
/// ```text
/// damage = base
/// if roll_d100 <= crit_percent:
///     damage *= crit_multiplier
/// damage = round(damage × uniform[100 - spread, 100 + spread] / 100)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageVariance {
    pub crit_percent: u32,
    pub crit_multiplier: u32,
    pub spread_percent: u32,
}

impl DamageVariance {
    pub const fn new(crit_percent: u32, crit_multiplier: u32, spread_percent: u32) -> Self {
        Self {
            crit_percent,
            crit_multiplier,
            spread_percent,
        }
    }

    /// Roll the final damage for `base`. Returns `(damage, critical)`.
    pub fn roll(&self, base: u32, rng: &mut impl RandomSource) -> (u32, bool) {
        let critical = self.crit_percent > 0 && rng.chance(self.crit_percent);
        let mut damage = base as u64;
        if critical {
            damage = damage.saturating_mul(self.crit_multiplier.max(1) as u64);
        }

        let spread = self.spread_percent.min(100);
        let percent = rng.range(100 - spread, 100 + spread) as u64;
        let varied = damage.saturating_mul(percent).saturating_add(50) / 100;

        (varied.min(u32::MAX as u64) as u32, critical)
    }
}

impl Default for DamageVariance {
    fn default() -> Self {
        Self::new(10, 2, 20)
    }
}

// ============================================================================
// Dodge
// ============================================================================

/// How much of a blow the defender avoided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Dodge {
    #[default]
    None,
    /// Damage halved before defense applies.
    Partial,
    /// Blow avoided entirely.
    Full,
}

impl Dodge {
    /// Classify a dodge roll against the top of its range.
    ///
    /// A roll equal to a non-zero maximum is a full dodge; a roll above half
    /// the maximum is a partial dodge.
    pub fn from_roll(roll: u32, max_dodge: u32) -> Self {
        if max_dodge > 0 && roll == max_dodge {
            Self::Full
        } else if roll as u64 * 2 > max_dodge as u64 {
            Self::Partial
        } else {
            Self::None
        }
    }

    /// Raw damage left after the dodge.
    pub const fn reduce(&self, raw: u32) -> u32 {
        match self {
            Self::None => raw,
            Self::Partial => raw / 2,
            Self::Full => 0,
        }
    }
}
