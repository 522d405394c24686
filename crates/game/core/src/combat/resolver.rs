//! Per-round decisions for each fight mode.
//!
//! The simulator owns the round loop (ordering, knock-outs, round limits);
//! a [`RoundResolver`] only decides who acts first and what a single blow
//! does. Every mode is a resolver, so all modes share the same termination
//! and logging behavior.

use crate::env::RandomSource;
use crate::stats::Combatant;

use super::damage::{DamageRule, DamageVariance, Dodge};
use super::log::{Blow, Side};

/// Decides initiative and blow outcomes for one fight mode.
pub trait RoundResolver {
    /// Side that strikes first this round.
    fn initiative(&mut self, left: &Combatant, right: &Combatant) -> Side;

    /// Resolve one blow from `attacker` (standing on `side`) to `defender`.
    fn strike(&mut self, attacker: &Combatant, defender: &Combatant, side: Side) -> Blow;
}

/// Higher attack first, ties to the left side.
fn attack_initiative(left: &Combatant, right: &Combatant) -> Side {
    if right.attack > left.attack {
        Side::Right
    } else {
        Side::Left
    }
}

/// Player versus player: one damage rule for both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PvpResolver {
    pub rule: DamageRule,
}

impl PvpResolver {
    pub const fn new(rule: DamageRule) -> Self {
        Self { rule }
    }
}

impl RoundResolver for PvpResolver {
    fn initiative(&mut self, left: &Combatant, right: &Combatant) -> Side {
        attack_initiative(left, right)
    }

    fn strike(&mut self, attacker: &Combatant, defender: &Combatant, side: Side) -> Blow {
        let damage = self.rule.apply(attacker.attack, defender.defense);
        Blow::plain(side, attacker.attack, damage)
    }
}

/// Hero (left) versus monster (right). The hero always acts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestResolver {
    pub hero_rule: DamageRule,
    pub monster_rule: DamageRule,
}

impl QuestResolver {
    pub const fn new(hero_rule: DamageRule, monster_rule: DamageRule) -> Self {
        Self {
            hero_rule,
            monster_rule,
        }
    }
}

impl RoundResolver for QuestResolver {
    fn initiative(&mut self, _left: &Combatant, _right: &Combatant) -> Side {
        Side::Left
    }

    fn strike(&mut self, attacker: &Combatant, defender: &Combatant, side: Side) -> Blow {
        let rule = match side {
            Side::Left => self.hero_rule,
            Side::Right => self.monster_rule,
        };
        Blow::plain(side, attacker.attack, rule.apply(attacker.attack, defender.defense))
    }
}

/// Wraps another resolver and rolls crits and spread over its damage.
#[derive(Debug)]
pub struct Varied<R, Inner> {
    inner: Inner,
    variance: DamageVariance,
    rng: R,
}

impl<R: RandomSource, Inner: RoundResolver> Varied<R, Inner> {
    pub fn new(inner: Inner, variance: DamageVariance, rng: R) -> Self {
        Self {
            inner,
            variance,
            rng,
        }
    }
}

impl<R: RandomSource, Inner: RoundResolver> RoundResolver for Varied<R, Inner> {
    fn initiative(&mut self, left: &Combatant, right: &Combatant) -> Side {
        self.inner.initiative(left, right)
    }

    fn strike(&mut self, attacker: &Combatant, defender: &Combatant, side: Side) -> Blow {
        let mut blow = self.inner.strike(attacker, defender, side);
        let (damage, critical) = self.variance.roll(blow.damage, &mut self.rng);
        blow.damage = damage;
        blow.critical = critical;
        blow
    }
}

/// Stat-driven variant using speed, agility and chance.
///
/// Combatants without extended stats fight with all three at zero.
#[derive(Debug)]
pub struct SkirmishResolver<R> {
    rng: R,
}

impl<R: RandomSource> SkirmishResolver<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn initiative_roll(&mut self, combatant: &Combatant) -> u32 {
        let (min, max) = combatant.extended_or_default().initiative_range();
        self.rng.range(min, max)
    }
}

impl<R: RandomSource> RoundResolver for SkirmishResolver<R> {
    fn initiative(&mut self, left: &Combatant, right: &Combatant) -> Side {
        let left_roll = self.initiative_roll(left);
        let right_roll = self.initiative_roll(right);
        if right_roll > left_roll {
            Side::Right
        } else {
            Side::Left
        }
    }

    fn strike(&mut self, attacker: &Combatant, defender: &Combatant, side: Side) -> Blow {
        let chance = attacker.extended_or_default().chance;
        let crit_roll = self.rng.range(0, chance);
        let critical = crit_roll as u64 * 2 > chance as u64;
        let raw = if critical {
            self.rng
                .range(attacker.attack, attacker.attack.saturating_mul(2))
        } else {
            self.rng.range(0, attacker.attack)
        };

        let (min_dodge, max_dodge) = defender.extended_or_default().dodge_range();
        let dodge = Dodge::from_roll(self.rng.range(min_dodge, max_dodge), max_dodge);
        let damage = dodge.reduce(raw).saturating_sub(defender.defense);

        Blow {
            attacker: side,
            raw,
            damage,
            critical,
            dodge,
        }
    }
}
