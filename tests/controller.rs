//! Integration tests for the snapshot stores and the tournament controller.

use badminton_tournament_web::{
    ControllerError, FileStore, MemoryStore, Roster, RoundType, StoreError, Tournament,
    TournamentController, TournamentError, TournamentState, TournamentStore,
};
use std::path::PathBuf;

fn controller() -> TournamentController<MemoryStore> {
    TournamentController::new(MemoryStore::new(), Roster::builtin().unwrap())
}

fn temp_snapshot_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("badminton-{}-{}", name, std::process::id()))
        .join("tournament.json")
}

#[tokio::test]
async fn first_load_creates_and_persists_roster_tournament() {
    let c = controller();
    assert_eq!(c.store().load().await.unwrap(), None);

    let t = c.tournament().await.unwrap();
    assert_eq!(t.groups.len(), 4);
    assert_eq!(c.store().load().await.unwrap(), Some(t));
}

#[tokio::test]
async fn record_score_persists_snapshot() {
    let c = controller();
    let t = c.record_score("C-0-2", 21, 16).await.unwrap();
    let stored = c.store().load().await.unwrap().unwrap();
    assert_eq!(stored, t);
    assert!(stored.find_match("C-0-2").unwrap().completed);
}

#[tokio::test]
async fn failed_update_leaves_snapshot_untouched() {
    let c = controller();
    let before = c.tournament().await.unwrap();
    let err = c.record_score("A-0-1", 20, 20).await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Tournament(TournamentError::TiedScore { .. })
    ));
    assert_eq!(c.store().load().await.unwrap(), Some(before));

    assert!(matches!(
        c.start_knockout_stage().await,
        Err(ControllerError::Tournament(TournamentError::IncompleteRound {
            round: RoundType::Group,
            ..
        }))
    ));
}

#[tokio::test]
async fn simulate_round_advances_one_phase_at_a_time() {
    let c = controller();
    let t = c.simulate_round().await.unwrap();
    assert_eq!(t.state(), TournamentState::QuarterFinals);
    let t = c.simulate_round().await.unwrap();
    assert_eq!(t.state(), TournamentState::SemiFinals);
    let t = c.simulate_round().await.unwrap();
    assert_eq!(t.state(), TournamentState::Finals);
    let t = c.simulate_round().await.unwrap();
    assert_eq!(t.state(), TournamentState::Completed);
    assert_eq!(c.store().load().await.unwrap(), Some(t));
}

#[tokio::test]
async fn reset_restores_unscored_roster_tournament() {
    let c = controller();
    c.simulate_round().await.unwrap();
    let t = c.reset().await.unwrap();
    assert_eq!(t, Roster::builtin().unwrap().build_tournament());
    assert_eq!(c.store().load().await.unwrap(), Some(t));
}

#[tokio::test]
async fn standings_flag_qualified_teams() {
    let c = controller();
    let rows = c.standings("A").await.unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| !r.qualified));

    c.simulate_round().await.unwrap();
    let rows = c.standings("A").await.unwrap();
    let qualified: Vec<bool> = rows.iter().map(|r| r.qualified).collect();
    assert_eq!(qualified, [true, true, false, false]);

    assert!(matches!(
        c.standings("Z").await,
        Err(ControllerError::GroupNotFound(id)) if id == "Z"
    ));
}

#[tokio::test]
async fn file_store_round_trips_snapshot() {
    let path = temp_snapshot_path("roundtrip");
    let store = FileStore::new(&path);
    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);

    let mut t: Tournament = Roster::builtin().unwrap().build_tournament();
    t.groups[0].matches[0].record_score(21, 4).unwrap();
    store.save(&t).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(t));

    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn file_store_reports_corrupt_snapshot() {
    let path = temp_snapshot_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"{ not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(
        store.load().await,
        Err(StoreError::Json(_))
    ));
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
