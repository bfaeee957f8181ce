//! Tournament aggregate, TournamentState, and TournamentError.

use crate::models::game::{GameMatch, RoundType};
use crate::models::group::{Group, GroupId};
use serde::{Deserialize, Serialize};

/// Errors raised by the tournament engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A match of the prerequisite round is not completed with a winner.
    IncompleteRound { round: RoundType, match_id: String },
    /// A generator got the wrong number of prerequisite matches.
    WrongMatchCount {
        round: RoundType,
        expected: usize,
        found: usize,
    },
    /// Quarter finals need exactly this many groups.
    WrongGroupCount { expected: usize, found: usize },
    /// A seeding entry names a group that is not in the tournament.
    UnknownGroup(GroupId),
    /// A group has fewer teams than the rank a seed asks for.
    NotEnoughTeams { group: GroupId, rank: usize },
    /// No match with this id in any round.
    MatchNotFound(String),
    /// Equal scores cannot decide a winner.
    TiedScore { match_id: String },
    /// The next round was already generated from this round's results.
    RoundLocked(RoundType),
    /// The round was already generated.
    RoundAlreadyGenerated(RoundType),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::IncompleteRound { round, match_id } => {
                write!(f, "All {} matches must be completed first (match {} is open)", round, match_id)
            }
            TournamentError::WrongMatchCount { round, expected, found } => {
                write!(f, "Expected {} {} matches, found {}", expected, round, found)
            }
            TournamentError::WrongGroupCount { expected, found } => {
                write!(f, "Expected {} groups, found {}", expected, found)
            }
            TournamentError::UnknownGroup(id) => write!(f, "Group {} not found", id),
            TournamentError::NotEnoughTeams { group, rank } => {
                write!(f, "Group {} has no team ranked {}", group, rank)
            }
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::TiedScore { match_id } => {
                write!(f, "Match {} cannot end in a tie", match_id)
            }
            TournamentError::RoundLocked(round) => {
                write!(f, "The {} can no longer be changed: the next round has started", round)
            }
            TournamentError::RoundAlreadyGenerated(round) => {
                write!(f, "The {} have already been generated", round)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Current phase of the tournament, derived from which rounds exist and are decided.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    GroupPlay,
    QuarterFinals,
    SemiFinals,
    /// Final and third place match generated; at least one still open.
    Finals,
    Completed,
}

/// Full tournament snapshot: pools and knockout rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Pools in seeding order (A, B, C, D).
    pub groups: Vec<Group>,
    /// Empty until the group stage is complete, then 4 matches.
    pub quarter_finals: Vec<GameMatch>,
    /// Empty until the quarter finals are complete, then 2 matches.
    pub semi_finals: Vec<GameMatch>,
    pub final_match: Option<GameMatch>,
    pub third_place: Option<GameMatch>,
}

impl Tournament {
    /// Create a tournament with pre-populated pools and no knockout rounds.
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            quarter_finals: Vec::new(),
            semi_finals: Vec::new(),
            final_match: None,
            third_place: None,
        }
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// All group matches across all pools have a result.
    pub fn group_stage_complete(&self) -> bool {
        self.groups.iter().all(Group::is_complete)
    }

    pub fn state(&self) -> TournamentState {
        if self.quarter_finals.is_empty() {
            return TournamentState::GroupPlay;
        }
        if self.semi_finals.is_empty() {
            return TournamentState::QuarterFinals;
        }
        match (&self.final_match, &self.third_place) {
            (Some(f), Some(t)) if f.completed && t.completed => TournamentState::Completed,
            (Some(_), _) | (_, Some(_)) => TournamentState::Finals,
            (None, None) => TournamentState::SemiFinals,
        }
    }

    /// Every match of every round, in play order.
    pub fn matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.groups
            .iter()
            .flat_map(|g| g.matches.iter())
            .chain(self.quarter_finals.iter())
            .chain(self.semi_finals.iter())
            .chain(self.final_match.iter())
            .chain(self.third_place.iter())
    }

    pub fn find_match(&self, id: &str) -> Option<&GameMatch> {
        self.matches().find(|m| m.id == id)
    }

    /// Mutable lookup of a match by id in any round.
    pub fn find_match_mut(&mut self, id: &str) -> Option<&mut GameMatch> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.matches.iter_mut())
            .chain(self.quarter_finals.iter_mut())
            .chain(self.semi_finals.iter_mut())
            .chain(self.final_match.iter_mut())
            .chain(self.third_place.iter_mut())
            .find(|m| m.id == id)
    }
}
