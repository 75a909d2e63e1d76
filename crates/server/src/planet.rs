use crate::config::ReadMode;
use crate::error::{optional_json, ApiError};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use ecobot_engine::advice;
use ecobot_engine::{PlanetGame, PlanetMission, PlanetState};
use ecobot_protocol::{
    routes, AdviceResponse, AdvisedState, CompleteMissionRequest, MissionCompleted, MissionList,
    MissionStarted, StartMissionRequest, StateUpdate, ToggleBuildingRequest,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

struct Session {
    game: PlanetGame,
    rng: StdRng,
}

pub struct PlanetApp {
    session: Mutex<Session>,
    read_mode: ReadMode,
}

impl PlanetApp {
    pub fn new(read_mode: ReadMode, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            session: Mutex::new(Session {
                game: PlanetGame::new(),
                rng,
            }),
            read_mode,
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn router(app: PlanetApp) -> Router {
    Router::new()
        .route(routes::GAME_STATE, get(api_game_state))
        .route(routes::GAME_RESET, post(api_game_reset))
        .route(routes::BUILDINGS_TOGGLE, post(api_buildings_toggle))
        .route(routes::MISSIONS_AVAILABLE, get(api_missions_available))
        .route(routes::MISSIONS_START, post(api_missions_start))
        .route(routes::MISSIONS_COMPLETE, post(api_missions_complete))
        .route(routes::ECOBOT_ADVICE, get(api_ecobot_advice))
        .with_state(Arc::new(app))
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

pub(crate) async fn api_game_state(
    State(app): State<Arc<PlanetApp>>,
) -> Json<AdvisedState<PlanetState>> {
    let mut session = app.session();
    if app.read_mode == ReadMode::Tick {
        session.game.tick();
    }
    let Session { game, rng } = &mut *session;
    let state = game.state().clone();
    let ecobot_advice = advice::advise(&state, rng).to_string();
    Json(AdvisedState {
        state,
        ecobot_advice,
    })
}

pub(crate) async fn api_game_reset(
    State(app): State<Arc<PlanetApp>>,
) -> Json<StateUpdate<PlanetState>> {
    let state = app.session().game.reset().clone();
    Json(StateUpdate::new("Juego reiniciado", state))
}

pub(crate) async fn api_buildings_toggle(
    State(app): State<Arc<PlanetApp>>,
    payload: Result<Json<ToggleBuildingRequest>, JsonRejection>,
) -> Result<Json<StateUpdate<PlanetState>>, ApiError> {
    let Json(input) = payload?;
    let state = app.session().game.toggle_building(&input.building)?.clone();
    Ok(Json(StateUpdate::new(
        format!("Estado de {} cambiado", input.building),
        state,
    )))
}

pub(crate) async fn api_missions_available(
    State(app): State<Arc<PlanetApp>>,
) -> Json<MissionList<PlanetMission>> {
    Json(MissionList {
        missions: app.session().game.missions().to_vec(),
    })
}

pub(crate) async fn api_missions_start(
    State(app): State<Arc<PlanetApp>>,
    payload: Result<Json<StartMissionRequest>, JsonRejection>,
) -> Result<Json<MissionStarted<PlanetMission>>, ApiError> {
    let Json(input) = payload?;
    let mission = app.session().game.start_mission(input.mission_id)?;
    Ok(Json(MissionStarted {
        message: "Misión iniciada".to_string(),
        mission,
    }))
}

pub(crate) async fn api_missions_complete(
    State(app): State<Arc<PlanetApp>>,
    body: Bytes,
) -> Result<Json<MissionCompleted<PlanetMission, PlanetState>>, ApiError> {
    let input: CompleteMissionRequest = optional_json(&body)?;
    let mut session = app.session();
    let completed_mission = session.game.complete_mission(input.mission_id)?;
    Ok(Json(MissionCompleted {
        message: "¡Misión completada!".to_string(),
        completed_mission,
        state: session.game.state().clone(),
        all_completed: None,
    }))
}

/// Never advances the simulation, whatever the read mode.
pub(crate) async fn api_ecobot_advice(State(app): State<Arc<PlanetApp>>) -> Json<AdviceResponse> {
    let mut session = app.session();
    let Session { game, rng } = &mut *session;
    let advice = advice::advise(game.state(), rng).to_string();
    Json(AdviceResponse {
        advice,
        timestamp: now_rfc3339(),
    })
}
