//! Badminton tournament tracker: models, standings and bracket logic, snapshot store, controller.

pub mod controller;
pub mod logic;
pub mod models;
pub mod store;

pub use controller::{ControllerError, StandingRow, TournamentController};
pub use logic::{
    advance, calculate_group_standings, generate_finals, generate_knockout_matches,
    generate_quarter_finals, generate_semi_finals, qualified_teams, record_match_score,
    simulate_open_matches, start_knockout_stage, Finals, Pairing, Roster, RosterError,
    RosterGroup, Seed, SeedingTable,
};
pub use models::{
    GameMatch, Group, GroupId, GroupStanding, MatchId, RoundType, Side, Team, TeamId, Tournament,
    TournamentError, TournamentState,
};
pub use store::{FileStore, MemoryStore, StoreError, TournamentStore};
