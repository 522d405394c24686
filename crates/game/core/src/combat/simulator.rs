//! Round loop shared by every fight mode.

use crate::config::{CombatRules, GameConfig};
use crate::env::RandomSource;
use crate::stats::Combatant;

use super::error::CombatError;
use super::log::{CombatantSummary, FightEnd, FightLog, FightMode, FightRound, Side};
use super::resolver::{PvpResolver, QuestResolver, RoundResolver, SkirmishResolver, Varied};

/// Resolves fights between two combatant snapshots.
///
/// The simulator holds only its rules. Each call works on private copies of
/// the combatants and returns the full [`FightLog`]; whether the resulting
/// health is written back is up to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatSimulator {
    rules: CombatRules,
}

impl CombatSimulator {
    pub fn new(rules: CombatRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// Effective round bound.
    pub fn round_limit(&self) -> Result<u32, CombatError> {
        match self.rules.max_rounds {
            Some(0) => Err(CombatError::InvalidRoundLimit),
            Some(limit) => Ok(limit),
            None => Ok(GameConfig::ROUND_SAFETY_LIMIT),
        }
    }

    /// Player versus player. `a` stands on the left.
    pub fn resolve_pvp(&self, a: &Combatant, b: &Combatant) -> Result<FightLog, CombatError> {
        let mut resolver = PvpResolver::new(self.rules.pvp_damage);
        self.resolve_with(FightMode::Pvp, a, b, &mut resolver)
    }

    /// Hero versus monster. The hero stands on the left and always opens.
    pub fn resolve_quest(
        &self,
        hero: &Combatant,
        monster: &Combatant,
    ) -> Result<FightLog, CombatError> {
        let mut resolver = self.quest_resolver();
        self.resolve_with(FightMode::Quest, hero, monster, &mut resolver)
    }

    /// [`resolve_pvp`](Self::resolve_pvp) with the configured damage variance.
    pub fn resolve_pvp_with(
        &self,
        a: &Combatant,
        b: &Combatant,
        rng: &mut impl RandomSource,
    ) -> Result<FightLog, CombatError> {
        let inner = PvpResolver::new(self.rules.pvp_damage);
        match self.rules.variance {
            Some(variance) => {
                let mut resolver = Varied::new(inner, variance, rng);
                self.resolve_with(FightMode::Pvp, a, b, &mut resolver)
            }
            None => self.resolve_pvp(a, b),
        }
    }

    /// [`resolve_quest`](Self::resolve_quest) with the configured damage variance.
    pub fn resolve_quest_with(
        &self,
        hero: &Combatant,
        monster: &Combatant,
        rng: &mut impl RandomSource,
    ) -> Result<FightLog, CombatError> {
        match self.rules.variance {
            Some(variance) => {
                let mut resolver = Varied::new(self.quest_resolver(), variance, rng);
                self.resolve_with(FightMode::Quest, hero, monster, &mut resolver)
            }
            None => self.resolve_quest(hero, monster),
        }
    }

    /// Stat-driven fight using extended stats for initiative, crits and dodges.
    pub fn resolve_skirmish(
        &self,
        a: &Combatant,
        b: &Combatant,
        rng: &mut impl RandomSource,
    ) -> Result<FightLog, CombatError> {
        let mut resolver = SkirmishResolver::new(rng);
        self.resolve_with(FightMode::Skirmish, a, b, &mut resolver)
    }

    /// Run the round loop with any resolver.
    ///
    /// # Errors
    ///
    /// - [`CombatError::InvalidCombatantState`] if either side has no health
    /// - [`CombatError::InvalidRoundLimit`] if `max_rounds` is zero
    pub fn resolve_with<R: RoundResolver + ?Sized>(
        &self,
        mode: FightMode,
        left: &Combatant,
        right: &Combatant,
        resolver: &mut R,
    ) -> Result<FightLog, CombatError> {
        let limit = self.round_limit()?;
        let mut fighters = [Self::prepare(left)?, Self::prepare(right)?];
        let summaries = [
            CombatantSummary::from(&fighters[0]),
            CombatantSummary::from(&fighters[1]),
        ];

        let mut rounds = Vec::new();
        let mut knockout = None;

        for round in 1..=limit {
            let initiative = resolver.initiative(&fighters[0], &fighters[1]);
            let mut record =
                FightRound::new(round, fighters[0].health, fighters[1].health, initiative);

            for attacker in [initiative, initiative.other()] {
                let defender = attacker.other();
                let blow = resolver.strike(
                    &fighters[attacker.index()],
                    &fighters[defender.index()],
                    attacker,
                );
                let remaining = fighters[defender.index()].take_damage(blow.damage);
                tracing::debug!(
                    "round {round}: {} hits {} for {} ({} left)",
                    fighters[attacker.index()].name,
                    fighters[defender.index()].name,
                    blow.damage,
                    remaining
                );
                record.blows.push(blow);

                if remaining == 0 {
                    knockout = Some(attacker);
                    break;
                }
            }

            rounds.push(record);
            if knockout.is_some() {
                break;
            }
        }

        let (winner, end) = match knockout {
            Some(side) => (side, FightEnd::Knockout),
            None => (Self::judge(&fighters), FightEnd::RoundLimit),
        };
        let [left_final, right_final] = fighters;
        let [left_summary, right_summary] = summaries;

        tracing::info!(
            "{mode} fight won by {} after {} rounds ({:?})",
            if winner == Side::Left { &left_final.name } else { &right_final.name },
            rounds.len(),
            end
        );

        Ok(FightLog {
            mode,
            left: left_summary,
            right: right_summary,
            rounds,
            winner,
            end,
            left_final_health: left_final.health,
            right_final_health: right_final.health,
        })
    }

    fn quest_resolver(&self) -> QuestResolver {
        QuestResolver::new(self.rules.hero_damage, self.rules.monster_damage)
    }

    /// Private fight copy. Rejects defeated combatants and lifts a stale
    /// maximum up to the current health.
    fn prepare(combatant: &Combatant) -> Result<Combatant, CombatError> {
        if combatant.health == 0 {
            return Err(CombatError::InvalidCombatantState {
                name: combatant.name.clone(),
                health: combatant.health,
            });
        }
        let mut copy = combatant.clone();
        copy.max_health = copy.max_health.max(copy.health);
        Ok(copy)
    }

    /// Higher remaining health percentage wins; exact ties go left.
    fn judge(fighters: &[Combatant; 2]) -> Side {
        let [left, right] = fighters;
        let left_score = left.health as u64 * right.max_health as u64;
        let right_score = right.health as u64 * left.max_health as u64;
        if right_score > left_score {
            Side::Right
        } else {
            Side::Left
        }
    }
}
