//! Tournament state controller: read snapshot, apply one change, write snapshot.

use crate::logic::{
    calculate_group_standings, qualified_teams, record_match_score, simulate_open_matches,
    start_knockout_stage, Roster,
};
use crate::models::{GroupStanding, Tournament, TournamentError};
use crate::store::{StoreError, TournamentStore};
use serde::Serialize;
use tokio::sync::Mutex;

/// Errors surfaced by controller operations.
#[derive(Debug)]
pub enum ControllerError {
    Tournament(TournamentError),
    Store(StoreError),
    GroupNotFound(String),
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::Tournament(e) => write!(f, "{}", e),
            ControllerError::Store(e) => write!(f, "{}", e),
            ControllerError::GroupNotFound(id) => write!(f, "Group {} not found", id),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Tournament(e) => Some(e),
            ControllerError::Store(e) => Some(e),
            ControllerError::GroupNotFound(_) => None,
        }
    }
}

impl From<TournamentError> for ControllerError {
    fn from(e: TournamentError) -> Self {
        ControllerError::Tournament(e)
    }
}

impl From<StoreError> for ControllerError {
    fn from(e: StoreError) -> Self {
        ControllerError::Store(e)
    }
}

/// A group table row with its qualification flag (top two of a finished group).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingRow {
    #[serde(flatten)]
    pub standing: GroupStanding,
    pub qualified: bool,
}

/// Single writer over one stored tournament.
pub struct TournamentController<S> {
    store: S,
    roster: Roster,
    /// Serializes read-compute-write cycles.
    write_lock: Mutex<()>,
}

impl<S: TournamentStore> TournamentController<S> {
    pub fn new(store: S, roster: Roster) -> Self {
        Self {
            store,
            roster,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored tournament, created from the roster and saved if none exists yet.
    async fn load_or_create(&self) -> Result<Tournament, ControllerError> {
        if let Some(t) = self.store.load().await? {
            return Ok(t);
        }
        let t = self.roster.build_tournament();
        self.store.save(&t).await?;
        log::info!("Created new tournament with {} groups", t.groups.len());
        Ok(t)
    }

    /// Apply `change` to the current snapshot and persist the result. Nothing is saved on error.
    async fn update<F>(&self, change: F) -> Result<Tournament, ControllerError>
    where
        F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut t = self.load_or_create().await?;
        change(&mut t)?;
        self.store.save(&t).await?;
        Ok(t)
    }

    pub async fn tournament(&self) -> Result<Tournament, ControllerError> {
        let _guard = self.write_lock.lock().await;
        self.load_or_create().await
    }

    /// Record a score; generates the next round when this completes the current one.
    pub async fn record_score(
        &self,
        match_id: &str,
        score_1: u32,
        score_2: u32,
    ) -> Result<Tournament, ControllerError> {
        self.update(|t| {
            if let Some(round) = record_match_score(t, match_id, score_1, score_2)? {
                log::info!("Match {} completed a round; generated {}", match_id, round);
            }
            Ok(())
        })
        .await
    }

    pub async fn start_knockout_stage(&self) -> Result<Tournament, ControllerError> {
        self.update(start_knockout_stage).await
    }

    /// Fill in random results for every open match of the current phase.
    pub async fn simulate_round(&self) -> Result<Tournament, ControllerError> {
        self.update(|t| {
            let scored = simulate_open_matches(t, &mut rand::thread_rng())?;
            log::info!("Simulated {} match(es)", scored);
            Ok(())
        })
        .await
    }

    /// Discard the stored tournament and start again from the roster.
    pub async fn reset(&self) -> Result<Tournament, ControllerError> {
        let _guard = self.write_lock.lock().await;
        self.store.clear().await?;
        let t = self.roster.build_tournament();
        self.store.save(&t).await?;
        log::info!("Tournament reset");
        Ok(t)
    }

    pub async fn standings(&self, group_id: &str) -> Result<Vec<StandingRow>, ControllerError> {
        let t = self.tournament().await?;
        let group = t
            .group(group_id)
            .ok_or_else(|| ControllerError::GroupNotFound(group_id.to_string()))?;
        let qualified = qualified_teams(group);
        Ok(calculate_group_standings(group)
            .into_iter()
            .map(|standing| StandingRow {
                qualified: qualified.contains(&standing.team),
                standing,
            })
            .collect())
    }
}
