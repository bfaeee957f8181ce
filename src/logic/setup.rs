//! Setup: read the team roster (CSV) and create the tournament with its round-robin pools.

use crate::logic::bracket::QUARTER_FINAL_GROUPS;
use crate::models::{Group, GroupId, Team, TeamId, Tournament};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Roster shipped with the binary: 16 teams in groups A to D.
pub const BUILTIN_ROSTER: &str = include_str!("../../data/teams.csv");

/// Errors while reading a roster.
#[derive(Debug)]
pub enum RosterError {
    Csv(csv::Error),
    /// Team ids must be unique across the whole roster.
    DuplicateTeam(TeamId),
    /// A group needs at least two teams to play a round robin.
    NotEnoughTeams(GroupId),
    /// The knockout stage is fed by a fixed number of groups.
    WrongGroupCount { expected: usize, found: usize },
    Empty,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Invalid roster file: {}", e),
            RosterError::DuplicateTeam(id) => write!(f, "Team id {} appears more than once", id),
            RosterError::NotEnoughTeams(id) => write!(f, "Group {} needs at least 2 teams", id),
            RosterError::WrongGroupCount { expected, found } => {
                write!(f, "Roster must have {} groups, found {}", expected, found)
            }
            RosterError::Empty => write!(f, "Roster has no teams"),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

/// One CSV line: `group,group_name,id,name,club,players` with players separated by `|`.
#[derive(Debug, Deserialize)]
struct RosterRow {
    group: GroupId,
    group_name: String,
    id: TeamId,
    name: String,
    club: String,
    players: String,
}

/// Teams of one group, in roster order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterGroup {
    pub id: GroupId,
    pub name: String,
    pub teams: Vec<Team>,
}

/// Validated team list, grouped in the order groups first appear.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Roster {
    groups: Vec<RosterGroup>,
}

impl Roster {
    pub fn builtin() -> Result<Self, RosterError> {
        Self::from_reader(BUILTIN_ROSTER.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, RosterError> {
        Self::from_csv(
            csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(reader),
        )
    }

    fn from_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self, RosterError> {
        let mut groups: Vec<RosterGroup> = Vec::new();
        let mut seen: HashSet<TeamId> = HashSet::new();

        for row in reader.deserialize::<RosterRow>() {
            let row = row?;
            if !seen.insert(row.id.clone()) {
                return Err(RosterError::DuplicateTeam(row.id));
            }
            let players = row
                .players
                .split('|')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
            let team = Team::new(row.id, row.name, row.club, players);

            match groups.iter_mut().find(|g| g.id == row.group) {
                Some(g) => g.teams.push(team),
                None => groups.push(RosterGroup {
                    id: row.group,
                    name: row.group_name,
                    teams: vec![team],
                }),
            }
        }

        if groups.is_empty() {
            return Err(RosterError::Empty);
        }
        if let Some(g) = groups.iter().find(|g| g.teams.len() < 2) {
            return Err(RosterError::NotEnoughTeams(g.id.clone()));
        }
        if groups.len() != QUARTER_FINAL_GROUPS {
            return Err(RosterError::WrongGroupCount {
                expected: QUARTER_FINAL_GROUPS,
                found: groups.len(),
            });
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[RosterGroup] {
        &self.groups
    }

    /// Fresh tournament: one round-robin pool per roster group, no knockout rounds.
    pub fn build_tournament(&self) -> Tournament {
        Tournament::new(
            self.groups
                .iter()
                .map(|g| Group::round_robin(g.id.clone(), g.name.clone(), g.teams.clone()))
                .collect(),
        )
    }
}
