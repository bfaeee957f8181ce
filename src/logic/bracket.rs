//! Knockout bracket: quarter finals from group standings, then semi finals, final and third place.

use crate::logic::standings::calculate_group_standings;
use crate::models::{
    GameMatch, GroupId, GroupStanding, RoundType, Team, Tournament, TournamentError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Groups feeding the quarter finals.
pub const QUARTER_FINAL_GROUPS: usize = 4;

/// A team's place in the bracket: finishing position `rank` (1-based) in group `group`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub group: GroupId,
    pub rank: usize,
}

impl Seed {
    pub fn new(group: impl Into<GroupId>, rank: usize) -> Self {
        Self {
            group: group.into(),
            rank,
        }
    }
}

/// One knockout match defined by the seeds that meet in it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub match_id: String,
    pub team_1: Seed,
    pub team_2: Seed,
}

/// Declarative pairing rule for the first knockout round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedingTable {
    pairings: Vec<Pairing>,
}

impl SeedingTable {
    pub fn new(pairings: Vec<Pairing>) -> Self {
        Self { pairings }
    }

    /// Cross over consecutive groups: for each pair (X, Y) the winner of X meets the runner-up
    /// of Y and the winner of Y meets the runner-up of X. With groups A..D this gives
    /// QF1 A1-B2, QF2 B1-A2, QF3 C1-D2, QF4 D1-C2.
    ///
    /// An odd trailing group is left out.
    pub fn cross_over<S: AsRef<str>>(group_ids: &[S]) -> Self {
        let mut pairings = Vec::with_capacity(group_ids.len());
        for pair in group_ids.chunks_exact(2) {
            let (x, y) = (pair[0].as_ref(), pair[1].as_ref());
            for (home, away) in [(x, y), (y, x)] {
                pairings.push(Pairing {
                    match_id: format!("QF{}", pairings.len() + 1),
                    team_1: Seed::new(home, 1),
                    team_2: Seed::new(away, 2),
                });
            }
        }
        Self { pairings }
    }

    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }
}

/// Resolve a seeding table against current group standings.
///
/// Every match gets `round = quarter` and `group = "QF"`. No completeness check happens here:
/// callers decide when the group stage is over.
pub fn generate_knockout_matches(
    tournament: &Tournament,
    table: &SeedingTable,
) -> Result<Vec<GameMatch>, TournamentError> {
    let standings: HashMap<&str, Vec<GroupStanding>> = tournament
        .groups
        .iter()
        .map(|g| (g.id.as_str(), calculate_group_standings(g)))
        .collect();

    let resolve = |seed: &Seed| -> Result<Team, TournamentError> {
        let rows = standings
            .get(seed.group.as_str())
            .ok_or_else(|| TournamentError::UnknownGroup(seed.group.clone()))?;
        seed.rank
            .checked_sub(1)
            .and_then(|i| rows.get(i))
            .map(|s| s.team.clone())
            .ok_or_else(|| TournamentError::NotEnoughTeams {
                group: seed.group.clone(),
                rank: seed.rank,
            })
    };

    table
        .pairings()
        .iter()
        .map(|p| -> Result<GameMatch, TournamentError> {
            Ok(GameMatch::new(
                p.match_id.clone(),
                resolve(&p.team_1)?,
                resolve(&p.team_2)?,
                "QF",
                RoundType::Quarter,
            ))
        })
        .collect()
}

/// Quarter finals for the standard four-group format, groups taken as A, B, C, D in stored order.
pub fn generate_quarter_finals(tournament: &Tournament) -> Result<[GameMatch; 4], TournamentError> {
    if tournament.groups.len() != QUARTER_FINAL_GROUPS {
        return Err(TournamentError::WrongGroupCount {
            expected: QUARTER_FINAL_GROUPS,
            found: tournament.groups.len(),
        });
    }
    let ids: Vec<&str> = tournament.groups.iter().map(|g| g.id.as_str()).collect();
    let matches = generate_knockout_matches(tournament, &SeedingTable::cross_over(&ids))?;
    let found = matches.len();
    matches.try_into().map_err(|_| TournamentError::WrongMatchCount {
        round: RoundType::Quarter,
        expected: 4,
        found,
    })
}

/// Winners of the decided prerequisite round, in match order.
fn decided_winners<'a>(
    matches: &'a [GameMatch],
    round: RoundType,
    expected: usize,
) -> Result<Vec<&'a Team>, TournamentError> {
    if matches.len() != expected {
        return Err(TournamentError::WrongMatchCount {
            round,
            expected,
            found: matches.len(),
        });
    }
    matches
        .iter()
        .map(|m| {
            m.winner_team()
                .filter(|_| m.completed)
                .ok_or_else(|| TournamentError::IncompleteRound {
                    round,
                    match_id: m.id.clone(),
                })
        })
        .collect()
}

/// Semi finals: winner QF1 vs winner QF2, winner QF3 vs winner QF4.
///
/// Fails unless given exactly four quarter finals, all completed with a winner.
pub fn generate_semi_finals(quarter_finals: &[GameMatch]) -> Result<[GameMatch; 2], TournamentError> {
    let w = decided_winners(quarter_finals, RoundType::Quarter, 4)?;
    Ok([
        GameMatch::new("SF1", w[0].clone(), w[1].clone(), "SF", RoundType::Semi),
        GameMatch::new("SF2", w[2].clone(), w[3].clone(), "SF", RoundType::Semi),
    ])
}

/// Final and third place match generated from the semi finals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Finals {
    pub final_match: GameMatch,
    pub third_place: GameMatch,
}

/// Final between the semi final winners, third place match between the losers.
///
/// Fails unless given exactly two semi finals, both completed with a winner.
pub fn generate_finals(semi_finals: &[GameMatch]) -> Result<Finals, TournamentError> {
    let winners = decided_winners(semi_finals, RoundType::Semi, 2)?;
    let losers: Vec<&Team> = semi_finals.iter().filter_map(GameMatch::loser_team).collect();
    Ok(Finals {
        final_match: GameMatch::new(
            "F1",
            winners[0].clone(),
            winners[1].clone(),
            "F",
            RoundType::Final,
        ),
        third_place: GameMatch::new(
            "TP1",
            losers[0].clone(),
            losers[1].clone(),
            "TP",
            RoundType::Third,
        ),
    })
}
