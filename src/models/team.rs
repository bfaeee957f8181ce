//! Team data structure.

use serde::{Deserialize, Serialize};

/// Unique identifier for a team (e.g. "A1").
pub type TeamId = String;

/// A doubles pair entered in the tournament. Immutable once created.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub club: String,
    pub players: Vec<String>,
}

impl Team {
    pub fn new(
        id: impl Into<TeamId>,
        name: impl Into<String>,
        club: impl Into<String>,
        players: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            club: club.into(),
            players,
        }
    }
}
