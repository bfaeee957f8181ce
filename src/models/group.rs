//! Round-robin pool and its derived standing rows.

use crate::models::game::{GameMatch, RoundType};
use crate::models::team::Team;
use serde::{Deserialize, Serialize};

/// Identifier of a pool ("A", "B", ...).
pub type GroupId = String;

/// A round-robin pool. Matches are fixed at creation; only their scores change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub teams: Vec<Team>,
    pub matches: Vec<GameMatch>,
}

impl Group {
    /// Create a pool with one match for every pair of teams, in team order (`i < j`).
    pub fn round_robin(id: impl Into<GroupId>, name: impl Into<String>, teams: Vec<Team>) -> Self {
        let id = id.into();
        let mut matches = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
        for (i, team_1) in teams.iter().enumerate() {
            for (j, team_2) in teams.iter().enumerate().skip(i + 1) {
                matches.push(GameMatch::new(
                    format!("{id}-{i}-{j}"),
                    team_1.clone(),
                    team_2.clone(),
                    id.clone(),
                    RoundType::Group,
                ));
            }
        }
        Self {
            id,
            name: name.into(),
            teams,
            matches,
        }
    }

    /// Every match in the pool has a result.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.completed)
    }
}

/// One row of a group table. Derived from match results, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub team: Team,
    pub points: u32,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    /// Sum of signed per-match score deltas.
    pub score_difference: i64,
}

impl GroupStanding {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            points: 0,
            matches_played: 0,
            matches_won: 0,
            matches_lost: 0,
            score_difference: 0,
        }
    }

    /// Count a completed match, whatever its result.
    pub fn add_played(&mut self) {
        self.matches_played += 1;
    }

    pub fn add_win(&mut self) {
        self.matches_won += 1;
        self.points += 1;
    }

    pub fn add_loss(&mut self) {
        self.matches_lost += 1;
    }
}
