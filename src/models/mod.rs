//! Data structures for the badminton tournament: teams, matches, groups, tournament.

mod game;
mod group;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, RoundType, Side};
pub use group::{Group, GroupId, GroupStanding};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentState};
