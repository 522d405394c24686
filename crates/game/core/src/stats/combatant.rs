//! Combatant - fight-time stat snapshot.
//!
//! A combatant is built fresh from a character sheet or monster template right
//! before a fight and discarded afterwards. Health changes during a fight
//! happen on the simulator's private copy; the caller decides whether any of
//! it is written back.

/// Extended attributes used by the stat-driven skirmish variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedStats {
    pub speed: u32,
    pub agility: u32,
    pub chance: u32,
}

impl ExtendedStats {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(speed: u32, agility: u32, chance: u32) -> Self {
        Self {
            speed,
            agility,
            chance,
        }
    }

    /// Field-wise saturating sum.
    pub const fn combine(&self, other: &ExtendedStats) -> Self {
        Self {
            speed: self.speed.saturating_add(other.speed),
            agility: self.agility.saturating_add(other.agility),
            chance: self.chance.saturating_add(other.chance),
        }
    }

    /// Initiative roll bounds: `[speed, speed + agility + chance]`.
    pub fn initiative_range(&self) -> (u32, u32) {
        (
            self.speed,
            self.speed
                .saturating_add(self.agility)
                .saturating_add(self.chance),
        )
    }

    /// Dodge roll bounds: `[agility, agility + chance + speed]`.
    pub fn dodge_range(&self) -> (u32, u32) {
        (
            self.agility,
            self.agility
                .saturating_add(self.chance)
                .saturating_add(self.speed),
        )
    }
}

/// One side's fight-relevant stats.
///
/// Invariant: `health <= max_health` (enforced by every constructor and
/// mutator).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    /// Display-only identifier.
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extended: Option<ExtendedStats>,
}

impl Combatant {
    /// Combatant at full health (`max_health == health`).
    pub fn new(name: impl Into<String>, health: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            health,
            max_health: health,
            attack,
            defense,
            extended: None,
        }
    }

    /// Set the maximum; current health is clamped to it.
    #[must_use]
    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self.health = self.health.min(max_health);
        self
    }

    /// Set current health (clamped to the maximum).
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    #[must_use]
    pub fn with_extended(mut self, extended: ExtendedStats) -> Self {
        self.extended = Some(extended);
        self
    }

    /// Extended stats, or all zeros when the snapshot carries none.
    pub fn extended_or_default(&self) -> ExtendedStats {
        self.extended.unwrap_or_default()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, clamping at 0. Returns the new health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_clamped_to_maximum() {
        let c = Combatant::new("knight", 80, 10, 5).with_health(500);
        assert_eq!(c.health, 80);

        let c = Combatant::new("knight", 80, 10, 5).with_max_health(60);
        assert_eq!((c.health, c.max_health), (60, 60));
    }

    #[test]
    fn damage_never_underflows() {
        let mut c = Combatant::new("squire", 10, 1, 1);
        assert_eq!(c.take_damage(4), 6);
        assert_eq!(c.take_damage(40), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn extended_ranges() {
        let stats = ExtendedStats::new(5, 10, 3);
        assert_eq!(stats.initiative_range(), (5, 18));
        assert_eq!(stats.dodge_range(), (10, 18));
        assert_eq!(
            stats.combine(&ExtendedStats::new(1, 1, 1)),
            ExtendedStats::new(6, 11, 4)
        );
    }
}
