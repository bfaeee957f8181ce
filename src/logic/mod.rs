//! Tournament business logic: setup, standings, bracket generation, round progression.

mod bracket;
mod progress;
mod setup;
mod simulate;
mod standings;

pub use bracket::{
    generate_finals, generate_knockout_matches, generate_quarter_finals, generate_semi_finals,
    Finals, Pairing, Seed, SeedingTable, QUARTER_FINAL_GROUPS,
};
pub use progress::{advance, record_match_score, start_knockout_stage};
pub use setup::{Roster, RosterError, RosterGroup, BUILTIN_ROSTER};
pub use simulate::simulate_open_matches;
pub use standings::{calculate_group_standings, qualified_teams, QUALIFIERS_PER_GROUP};
