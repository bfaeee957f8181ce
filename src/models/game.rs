//! Match (game), Side, and RoundType.

use crate::models::team::Team;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match ("A-0-1", "QF1", "F1", ...).
pub type MatchId = String;

/// Which side of a match won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Stage of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    Group,
    Quarter,
    Semi,
    Final,
    Third,
}

impl std::fmt::Display for RoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundType::Group => "group stage",
            RoundType::Quarter => "quarter finals",
            RoundType::Semi => "semi finals",
            RoundType::Final => "final",
            RoundType::Third => "third place match",
        };
        f.write_str(name)
    }
}

/// A single match between two teams.
///
/// `completed` is true exactly when both scores and `winner` are set; use
/// [`GameMatch::record_score`] to keep the three in sync.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team_1: Team,
    pub team_2: Team,
    /// None until a score is recorded.
    pub score_1: Option<u32>,
    pub score_2: Option<u32>,
    pub winner: Option<Side>,
    /// Pool id for group matches, bracket tag ("QF", "SF", "F", "TP") otherwise.
    pub group: String,
    pub round: RoundType,
    pub completed: bool,
}

impl GameMatch {
    /// New unscored match.
    pub fn new(
        id: impl Into<MatchId>,
        team_1: Team,
        team_2: Team,
        group: impl Into<String>,
        round: RoundType,
    ) -> Self {
        Self {
            id: id.into(),
            team_1,
            team_2,
            score_1: None,
            score_2: None,
            winner: None,
            group: group.into(),
            round,
            completed: false,
        }
    }

    /// Set both scores and derive the winner. Equal scores are rejected and leave the match untouched.
    pub fn record_score(&mut self, score_1: u32, score_2: u32) -> Result<(), TournamentError> {
        if score_1 == score_2 {
            return Err(TournamentError::TiedScore {
                match_id: self.id.clone(),
            });
        }
        self.score_1 = Some(score_1);
        self.score_2 = Some(score_2);
        self.winner = Some(if score_1 > score_2 { Side::One } else { Side::Two });
        self.completed = true;
        Ok(())
    }

    /// Completed with a winner: the state every generator requires of its inputs.
    pub fn is_decided(&self) -> bool {
        self.completed && self.winner.is_some()
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::One => &self.team_1,
            Side::Two => &self.team_2,
        }
    }

    pub fn winner_team(&self) -> Option<&Team> {
        self.winner.map(|side| self.team(side))
    }

    /// The team that is not the winner.
    pub fn loser_team(&self) -> Option<&Team> {
        self.winner.map(|side| self.team(side.opposite()))
    }
}
