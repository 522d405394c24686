//! Fight records produced by the simulator.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::stats::Combatant;

use super::damage::Dodge;

/// Position of a combatant in a fight.
///
/// PvP maps player 1 to `Left`; quests map the hero to `Left`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Which rule set produced a log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FightMode {
    Pvp,
    Quest,
    Skirmish,
}

/// How a fight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FightEnd {
    /// One side's health reached zero.
    Knockout,
    /// The round limit was hit; the winner was judged on remaining health.
    RoundLimit,
}

/// A single attack within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blow {
    pub attacker: Side,
    /// Damage before mitigation.
    pub raw: u32,
    /// Damage actually subtracted from the defender.
    pub damage: u32,
    pub critical: bool,
    pub dodge: Dodge,
}

impl Blow {
    /// Plain hit without crit or dodge.
    pub const fn plain(attacker: Side, raw: u32, damage: u32) -> Self {
        Self {
            attacker,
            raw,
            damage,
            critical: false,
            dodge: Dodge::None,
        }
    }

    pub const fn target(&self) -> Side {
        self.attacker.other()
    }
}

/// Record of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FightRound {
    /// 1-based round number.
    pub round: u32,
    /// Left health before the round's blows.
    pub left_health: u32,
    /// Right health before the round's blows.
    pub right_health: u32,
    pub initiative: Side,
    /// Blows in the order they landed. The second is missing when the
    /// first knocked the defender out.
    pub blows: ArrayVec<Blow, { GameConfig::MAX_BLOWS_PER_ROUND }>,
}

impl FightRound {
    pub fn new(round: u32, left_health: u32, right_health: u32, initiative: Side) -> Self {
        Self {
            round,
            left_health,
            right_health,
            initiative,
            blows: ArrayVec::new(),
        }
    }

    /// Health of `side` before the round.
    pub const fn health_before(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_health,
            Side::Right => self.right_health,
        }
    }

    /// Damage `side` received this round, `None` if it was never struck.
    pub fn damage_to(&self, side: Side) -> Option<u32> {
        self.blows
            .iter()
            .find(|blow| blow.target() == side)
            .map(|blow| blow.damage)
    }

    /// Health of `side` after the round's blows.
    pub fn health_after(&self, side: Side) -> u32 {
        self.health_before(side)
            .saturating_sub(self.damage_to(side).unwrap_or(0))
    }
}

/// Pre-fight stats of one side, as shown in reports.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSummary {
    pub name: String,
    pub original_health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
}

impl From<&Combatant> for CombatantSummary {
    fn from(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            original_health: combatant.health,
            max_health: combatant.max_health,
            attack: combatant.attack,
            defense: combatant.defense,
        }
    }
}

/// Complete, ordered record of a fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FightLog {
    pub mode: FightMode,
    pub left: CombatantSummary,
    pub right: CombatantSummary,
    pub rounds: Vec<FightRound>,
    pub winner: Side,
    pub end: FightEnd,
    pub left_final_health: u32,
    pub right_final_health: u32,
}

impl FightLog {
    pub fn summary(&self, side: Side) -> &CombatantSummary {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn winner_name(&self) -> &str {
        &self.summary(self.winner).name
    }

    pub fn loser(&self) -> Side {
        self.winner.other()
    }

    pub fn final_health(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_final_health,
            Side::Right => self.right_final_health,
        }
    }

    pub fn round_count(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// Total damage `side` took over the fight.
    pub fn damage_taken(&self, side: Side) -> u32 {
        self.rounds
            .iter()
            .filter_map(|round| round.damage_to(side))
            .fold(0u32, u32::saturating_add)
    }

    /// Health of `side` after each round, starting with its pre-fight value.
    pub fn health_trajectory(&self, side: Side) -> Vec<u32> {
        core::iter::once(self.summary(side).original_health)
            .chain(self.rounds.iter().map(|round| round.health_after(side)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_to_only_reports_struck_sides() {
        let mut round = FightRound::new(1, 30, 10, Side::Left);
        round.blows.push(Blow::plain(Side::Left, 12, 12));

        assert_eq!(round.damage_to(Side::Right), Some(12));
        assert_eq!(round.damage_to(Side::Left), None);
        assert_eq!(round.health_after(Side::Right), 0);
        assert_eq!(round.health_after(Side::Left), 30);
    }

    #[test]
    fn sides_are_symmetric() {
        for side in Side::BOTH {
            assert_eq!(side.other().other(), side);
            assert_ne!(side.index(), side.other().index());
        }
    }
}
