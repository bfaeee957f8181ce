//! Single binary web server: JSON API over the stored tournament.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DATA_PATH (snapshot file), TEAMS_CSV (roster to use instead of the built-in one).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_tournament_web::{
    ControllerError, FileStore, Roster, Tournament, TournamentController, TournamentError,
    TournamentState,
};
use serde::{Deserialize, Serialize};

type AppState = Data<TournamentController<FileStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Snapshot plus its derived phase.
#[derive(Serialize)]
struct TournamentResponse {
    state: TournamentState,
    #[serde(flatten)]
    tournament: Tournament,
}

impl From<Tournament> for TournamentResponse {
    fn from(tournament: Tournament) -> Self {
        Self {
            state: tournament.state(),
            tournament,
        }
    }
}

#[derive(Deserialize)]
struct ScoreBody {
    score_1: u32,
    score_2: u32,
}

/// Path segment: match id (e.g. /api/matches/{id}/score)
#[derive(Deserialize)]
struct MatchPath {
    id: String,
}

/// Path segment: group id (e.g. /api/groups/{id}/standings)
#[derive(Deserialize)]
struct GroupPath {
    id: String,
}

fn error_response(e: ControllerError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ControllerError::GroupNotFound(_)
        | ControllerError::Tournament(TournamentError::MatchNotFound(_)) => {
            HttpResponse::NotFound().json(body)
        }
        ControllerError::Tournament(_) => HttpResponse::BadRequest().json(body),
        ControllerError::Store(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn tournament_response(result: Result<Tournament, ControllerError>) -> HttpResponse {
    match result {
        Ok(t) => HttpResponse::Ok().json(TournamentResponse::from(t)),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// Current tournament (created from the roster on first access).
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    tournament_response(state.tournament().await)
}

/// Group table with qualification flags.
#[get("/api/groups/{id}/standings")]
async fn api_group_standings(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    match state.standings(&path.id).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// Record a score for any match; the next round is generated when this completes a round.
#[put("/api/matches/{id}/score")]
async fn api_set_score(state: AppState, path: Path<MatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    tournament_response(state.record_score(&path.id, body.score_1, body.score_2).await)
}

/// Generate quarter finals (all group matches must be completed).
#[post("/api/knockout/start")]
async fn api_start_knockout(state: AppState) -> HttpResponse {
    tournament_response(state.start_knockout_stage().await)
}

/// Random results for every open match of the current phase.
#[post("/api/simulate")]
async fn api_simulate(state: AppState) -> HttpResponse {
    tournament_response(state.simulate_round().await)
}

/// Discard all results and start over from the roster.
#[post("/api/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    tournament_response(state.reset().await)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_path() -> String {
    "data/tournament.json".to_string()
}

fn load_roster() -> std::io::Result<Roster> {
    let roster = match std::env::var("TEAMS_CSV") {
        Ok(path) => {
            log::info!("Loading roster from {}", path);
            Roster::from_path(path)
        }
        Err(_) => Roster::builtin(),
    };
    roster.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_path = std::env::var("DATA_PATH").unwrap_or_else(|_| default_data_path());

    let roster = load_roster()?;
    log::info!(
        "Roster: {} groups, {} teams",
        roster.groups().len(),
        roster.groups().iter().map(|g| g.teams.len()).sum::<usize>()
    );
    log::info!("Tournament snapshot at {}", data_path);

    let state = Data::new(TournamentController::new(FileStore::new(data_path), roster));

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_group_standings)
            .service(api_set_score)
            .service(api_start_knockout)
            .service(api_simulate)
            .service(api_reset)
    })
    .bind(bind)?
    .run()
    .await
}
