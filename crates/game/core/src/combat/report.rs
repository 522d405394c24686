//! JSON-facing view of a [`FightLog`].
//!
//! PvP and skirmish fights are reported as `player1`/`player2`, quests as
//! `hero`/`monster`, matching the payload the game's HTTP layer returns.
//!
//! ```json
//! {
//!   "mode": "PVP",
//!   "players": { "player1": { "name": "a", ... }, "player2": { ... } },
//!   "rounds": [ { "round": 1, "player1_health": 100, "damage_to_player2": 15, ... } ],
//!   "winner": "a"
//! }
//! ```

use serde::Serialize;

use super::log::{CombatantSummary, FightEnd, FightLog, FightMode, FightRound, Side};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FightReport {
    pub mode: &'static str,
    #[serde(flatten)]
    pub sides: ReportSides,
    pub rounds: Vec<RoundReport>,
    pub winner: String,
    pub end: FightEnd,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SideReport {
    pub name: String,
    pub original_health: u32,
    pub final_health: u32,
    pub attack: u32,
    pub defense: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerPair {
    pub player1: SideReport,
    pub player2: SideReport,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportSides {
    Players { players: PlayerPair },
    Encounter { hero: SideReport, monster: SideReport },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayersRound {
    pub round: u32,
    pub player1_health: u32,
    pub player2_health: u32,
    pub initiative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_to_player2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_to_player1: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EncounterRound {
    pub round: u32,
    pub hero_health: u32,
    pub monster_health: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_to_monster: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_to_hero: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RoundReport {
    Players(PlayersRound),
    Encounter(EncounterRound),
}

const fn mode_label(mode: FightMode) -> &'static str {
    match mode {
        FightMode::Pvp => "PVP",
        FightMode::Quest => "Quest",
        FightMode::Skirmish => "Skirmish",
    }
}

fn side_report(log: &FightLog, side: Side) -> SideReport {
    let CombatantSummary {
        name,
        original_health,
        attack,
        defense,
        ..
    } = log.summary(side).clone();
    SideReport {
        name,
        original_health,
        final_health: log.final_health(side),
        attack,
        defense,
    }
}

/// Winner name on the round that ended the fight by knock-out.
fn round_winner(log: &FightLog, round: &FightRound) -> Option<String> {
    let last = log.rounds.last().map(|last| last.round) == Some(round.round);
    (last && log.end == FightEnd::Knockout).then(|| log.winner_name().to_owned())
}

impl From<&FightLog> for FightReport {
    fn from(log: &FightLog) -> Self {
        let encounter = log.mode == FightMode::Quest;

        let sides = if encounter {
            ReportSides::Encounter {
                hero: side_report(log, Side::Left),
                monster: side_report(log, Side::Right),
            }
        } else {
            ReportSides::Players {
                players: PlayerPair {
                    player1: side_report(log, Side::Left),
                    player2: side_report(log, Side::Right),
                },
            }
        };

        let rounds = log
            .rounds
            .iter()
            .map(|round| {
                let winner = round_winner(log, round);
                if encounter {
                    RoundReport::Encounter(EncounterRound {
                        round: round.round,
                        hero_health: round.left_health,
                        monster_health: round.right_health,
                        damage_to_monster: round.damage_to(Side::Right),
                        damage_to_hero: round.damage_to(Side::Left),
                        winner,
                    })
                } else {
                    RoundReport::Players(PlayersRound {
                        round: round.round,
                        player1_health: round.left_health,
                        player2_health: round.right_health,
                        initiative: log.summary(round.initiative).name.clone(),
                        damage_to_player2: round.damage_to(Side::Right),
                        damage_to_player1: round.damage_to(Side::Left),
                        winner,
                    })
                }
            })
            .collect();

        Self {
            mode: mode_label(log.mode),
            sides,
            rounds,
            winner: log.winner_name().to_owned(),
            end: log.end,
        }
    }
}
