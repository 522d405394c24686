//! Invariants every fight log must satisfy.

use arena_core::combat::{FightEnd, FightLog, Side};
use arena_core::{
    CombatRules, CombatSimulator, Combatant, DamageRule, DamageVariance, ExtendedStats, SeededRng,
};
use proptest::prelude::*;

fn combatant(name: &'static str) -> impl Strategy<Value = Combatant> {
    (1u32..300, 0u32..60, 0u32..40, 0u32..15, 0u32..15, 0u32..15).prop_map(
        move |(health, attack, defense, speed, agility, chance)| {
            Combatant::new(name, health, attack, defense)
                .with_extended(ExtendedStats::new(speed, agility, chance))
        },
    )
}

fn check_log(log: &FightLog, limit: u32) {
    assert!(!log.rounds.is_empty());
    assert!(log.round_count() <= limit);

    for (index, round) in log.rounds.iter().enumerate() {
        assert_eq!(round.round, index as u32 + 1);
        assert!(!round.blows.is_empty() && round.blows.len() <= 2);
    }

    for side in Side::BOTH {
        let trajectory = log.health_trajectory(side);
        assert!(trajectory.windows(2).all(|pair| pair[1] <= pair[0]));
        assert_eq!(trajectory.last().copied(), Some(log.final_health(side)));
    }

    match log.end {
        FightEnd::Knockout => {
            assert_eq!(log.final_health(log.loser()), 0);
            assert!(log.final_health(log.winner) > 0);
        }
        FightEnd::RoundLimit => assert_eq!(log.round_count(), limit),
    }
}

proptest! {
    #[test]
    fn pvp_logs_are_well_formed(a in combatant("a"), b in combatant("b"), limit in 1u32..80) {
        let sim = CombatSimulator::new(CombatRules::default().with_max_rounds(limit));
        let log = sim.resolve_pvp(&a, &b).unwrap();
        check_log(&log, limit);
    }

    #[test]
    fn quest_logs_are_well_formed(hero in combatant("hero"), monster in combatant("monster")) {
        let sim = CombatSimulator::new(CombatRules::default().with_max_rounds(50));
        let log = sim.resolve_quest(&hero, &monster).unwrap();
        check_log(&log, 50);
    }

    #[test]
    fn skirmish_logs_are_well_formed(a in combatant("a"), b in combatant("b"), seed in any::<u64>()) {
        let sim = CombatSimulator::new(CombatRules::default().with_max_rounds(60));
        let log = sim.resolve_skirmish(&a, &b, &mut SeededRng::new(seed)).unwrap();
        check_log(&log, 60);
    }

    #[test]
    fn full_defense_blocks_weak_attacks(attack in 0u32..50, extra in 0u32..50) {
        prop_assert_eq!(DamageRule::FullDefense.apply(attack, attack + extra), 0);
    }

    #[test]
    fn seeded_fights_are_deterministic(a in combatant("a"), b in combatant("b"), seed in any::<u64>()) {
        let sim = CombatSimulator::new(
            CombatRules::default()
                .with_max_rounds(40)
                .with_variance(DamageVariance::default()),
        );
        let first = sim.resolve_pvp_with(&a, &b, &mut SeededRng::new(seed)).unwrap();
        let second = sim.resolve_pvp_with(&a, &b, &mut SeededRng::new(seed)).unwrap();
        prop_assert_eq!(first, second);
    }
}
