//! Single binary web server: HTML from templates/, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, COMPETITION_TTL_HOURS (inactivity cleanup), RUST_LOG.

use actix_web::{
    delete, get, post, put,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use competition_manager::{
    export_json, import_json, import_teams_csv, next_cup_round, shuffle_teams, standings,
    standings_to_csv, start_competition, undo_last_round, update_score, Competition,
    CompetitionError, CompetitionId, CompetitionType, MatchId, ScoreField, Settings, TeamId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-competition entry: state + last activity time (for auto-cleanup).
struct CompetitionEntry {
    competition: Competition,
    last_activity: Instant,
}

/// In-memory state: many competitions by id. Entries are removed after the configured inactivity.
type AppState = Data<RwLock<HashMap<CompetitionId, CompetitionEntry>>>;

/// Runtime configuration read from the environment.
struct ServerConfig {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let ttl_hours: u64 = std::env::var("COMPETITION_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(ttl_hours * 3600),
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateCompetitionBody {
    #[serde(default = "default_competition_name")]
    name: String,
    #[serde(default)]
    competition_type: CompetitionType,
    #[serde(default)]
    settings: Option<Settings>,
}

fn default_competition_name() -> String {
    "My Tournament".to_string()
}

#[derive(Deserialize)]
struct AddTeamBody {
    /// Omitted: the next free "Team N" name is used.
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct TypeBody {
    competition_type: CompetitionType,
}

#[derive(Deserialize)]
struct ScoreBody {
    field: ScoreField,
    /// null clears the field.
    value: Option<u32>,
}

/// Path segment: competition id (e.g. /api/competitions/{id})
#[derive(Deserialize)]
struct CompetitionPath {
    id: CompetitionId,
}

#[derive(Deserialize)]
struct CompetitionTeamPath {
    id: CompetitionId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct CompetitionMatchPath {
    id: CompetitionId,
    match_id: MatchId,
}

fn error_response(e: &CompetitionError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No competition" }))
}

/// Run `action` against one competition and reply with the updated state.
fn mutate<F>(state: &AppState, id: CompetitionId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Competition) -> Result<(), CompetitionError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let c = &mut entry.competition;
    match action(c) {
        Ok(()) => HttpResponse::Ok().json(&*c),
        Err(e) => {
            log::debug!("Competition {id}: {e}");
            error_response(&e)
        }
    }
}

/// Store a new competition and reply with it.
fn insert(state: &AppState, competition: Competition) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&competition);
    g.insert(
        competition.id,
        CompetitionEntry {
            competition,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "competition-manager",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new competition in Setup (returns it with id; client stores id for subsequent requests).
#[post("/api/competitions")]
async fn api_create_competition(state: AppState, body: Option<Json<CreateCompetitionBody>>) -> HttpResponse {
    let competition = match body {
        Some(b) => {
            let b = b.into_inner();
            let mut c = Competition::new(b.name, b.competition_type);
            if let Some(settings) = b.settings {
                c.settings = settings;
            }
            c
        }
        None => Competition::new(default_competition_name(), CompetitionType::default()),
    };
    log::info!("Created competition {}", competition.id);
    insert(&state, competition)
}

/// Load a previously exported file as a new competition.
#[post("/api/competitions/import")]
async fn api_import_competition(state: AppState, body: String) -> HttpResponse {
    match import_json(&body) {
        Ok(competition) => {
            log::info!("Imported competition {} (\"{}\")", competition.id, competition.name);
            insert(&state, competition)
        }
        Err(e) => error_response(&e),
    }
}

/// Get a competition by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/competitions/{id}")]
async fn api_get_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    mutate(&state, path.id, |_| Ok(()))
}

/// Download the competition as a JSON save file.
#[get("/api/competitions/{id}/export")]
async fn api_export_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let c = &entry.competition;
    match export_json(c) {
        Ok(json) => {
            let kind = match c.competition_type {
                CompetitionType::League => "league",
                CompetitionType::Cup => "cup",
            };
            HttpResponse::Ok()
                .content_type("application/json")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(format!("competition-{kind}.json"))],
                })
                .body(json)
        }
        Err(e) => error_response(&e),
    }
}

/// Add a team (Setup only).
#[post("/api/competitions/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<CompetitionPath>, body: Option<Json<AddTeamBody>>) -> HttpResponse {
    let name = body.and_then(|b| b.into_inner().name);
    mutate(&state, path.id, |c| {
        match name {
            Some(name) => c.add_team(name.trim())?,
            None => c.add_default_team()?,
        };
        Ok(())
    })
}

/// Append teams from a CSV body, one name per row (Setup only).
#[post("/api/competitions/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<CompetitionPath>, body: Bytes) -> HttpResponse {
    mutate(&state, path.id, |c| import_teams_csv(c, body.as_ref()).map(|_| ()))
}

/// Randomize team order (Setup only).
#[post("/api/competitions/{id}/teams/shuffle")]
async fn api_shuffle_teams(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    mutate(&state, path.id, shuffle_teams)
}

/// Rename a team (Setup only).
#[put("/api/competitions/{id}/teams/{team_id}")]
async fn api_rename_team(state: AppState, path: Path<CompetitionTeamPath>, body: Json<NameBody>) -> HttpResponse {
    let team_id = path.team_id;
    mutate(&state, path.id, |c| c.rename_team(team_id, body.into_inner().name))
}

/// Remove a team by id (Setup only).
#[delete("/api/competitions/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<CompetitionTeamPath>) -> HttpResponse {
    let team_id = path.team_id;
    mutate(&state, path.id, |c| c.remove_team(team_id))
}

#[put("/api/competitions/{id}/name")]
async fn api_set_name(state: AppState, path: Path<CompetitionPath>, body: Json<NameBody>) -> HttpResponse {
    mutate(&state, path.id, |c| c.set_name(body.into_inner().name))
}

/// Switch between league and cup (Setup only).
#[put("/api/competitions/{id}/type")]
async fn api_set_type(state: AppState, path: Path<CompetitionPath>, body: Json<TypeBody>) -> HttpResponse {
    mutate(&state, path.id, |c| c.set_competition_type(body.competition_type))
}

/// Update points and leg settings (Setup only).
#[put("/api/competitions/{id}/settings")]
async fn api_set_settings(state: AppState, path: Path<CompetitionPath>, body: Json<Settings>) -> HttpResponse {
    mutate(&state, path.id, |c| c.set_settings(body.into_inner()))
}

/// Validate teams and generate fixtures (Setup -> Active).
#[post("/api/competitions/{id}/start")]
async fn api_start_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    mutate(&state, path.id, start_competition)
}

/// Set or clear a score or penalty field of one match.
#[put("/api/competitions/{id}/matches/{match_id}/score")]
async fn api_update_score(state: AppState, path: Path<CompetitionMatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    let match_id = path.match_id;
    mutate(&state, path.id, |c| update_score(c, match_id, body.field, body.value))
}

/// Resolve the current cup round (next round or champion).
#[post("/api/competitions/{id}/cup/advance")]
async fn api_cup_advance(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    mutate(&state, path.id, next_cup_round)
}

/// Undo the most recent cup round advance.
#[post("/api/competitions/{id}/cup/undo")]
async fn api_cup_undo(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    mutate(&state, path.id, undo_last_round)
}

/// League table as JSON.
#[get("/api/competitions/{id}/standings")]
async fn api_standings(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => match standings(&entry.competition) {
            Ok(table) => HttpResponse::Ok().json(table),
            Err(e) => error_response(&e),
        },
        None => not_found(),
    }
}

/// League table as CSV.
#[get("/api/competitions/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let mut out = Vec::new();
    let result = standings(&entry.competition).and_then(|table| standings_to_csv(&mut out, &table));
    match result {
        Ok(()) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(out),
        Err(e) => error_response(&e),
    }
}

/// Back to Setup with the same teams and settings.
#[post("/api/competitions/{id}/reset")]
async fn api_reset_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    mutate(&state, path.id, |c| {
        c.reset();
        Ok(())
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<CompetitionId, CompetitionEntry>::new()));

    // Background task: every 30 minutes, remove competitions past the inactivity timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive competition(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_competition)
            .service(api_import_competition)
            .service(api_get_competition)
            .service(api_export_competition)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_shuffle_teams)
            .service(api_rename_team)
            .service(api_remove_team)
            .service(api_set_name)
            .service(api_set_type)
            .service(api_set_settings)
            .service(api_start_competition)
            .service(api_update_score)
            .service(api_cup_advance)
            .service(api_cup_undo)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_reset_competition)
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
