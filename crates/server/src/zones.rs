use crate::error::{optional_json, ApiError};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use ecobot_engine::{ActiveZoneMission, Position, ZoneCatalog, ZoneGame, ZoneOutcome, ZoneState};
use ecobot_protocol::{
    routes, CompleteZoneMissionRequest, MessageResponse, MissionCompleted, MissionStarted,
    MoveRequest, PositionResponse, StartZoneRequest, StateUpdate,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ZonesApp {
    game: Mutex<ZoneGame>,
}

impl ZonesApp {
    pub fn new(catalog: Arc<ZoneCatalog>) -> Self {
        Self {
            game: Mutex::new(ZoneGame::new(catalog)),
        }
    }

    fn game(&self) -> MutexGuard<'_, ZoneGame> {
        self.game.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn router(app: ZonesApp) -> Router {
    Router::new()
        .route(routes::GAME_STATE, get(api_game_state))
        .route(routes::PLAYER_MOVE, post(api_player_move))
        .route(routes::ZONE_START, post(api_zone_start))
        .route(routes::MISSION_COMPLETE, post(api_mission_complete))
        .route(routes::GAME_RESET, post(api_game_reset))
        .route(routes::ECOBOT_MESSAGE, get(api_ecobot_message))
        .with_state(Arc::new(app))
}

/// Mission completion answers with a different shape on failure and on success.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ZoneCompletion {
    Failed(StateUpdate<ZoneState>),
    Completed(MissionCompleted<ActiveZoneMission, ZoneState>),
}

pub(crate) async fn api_game_state(State(app): State<Arc<ZonesApp>>) -> Json<ZoneState> {
    Json(app.game().state().clone())
}

pub(crate) async fn api_player_move(
    State(app): State<Arc<ZonesApp>>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<PositionResponse<Position>>, ApiError> {
    let Json(input) = payload?;
    let position = app.game().move_player(input.direction.as_deref());
    Ok(Json(PositionResponse { position }))
}

pub(crate) async fn api_zone_start(
    State(app): State<Arc<ZonesApp>>,
    payload: Result<Json<StartZoneRequest>, JsonRejection>,
) -> Result<Json<MissionStarted<ActiveZoneMission>>, ApiError> {
    let Json(input) = payload?;
    let started = app.game().start_zone(&input.zone_id)?;
    Ok(Json(MissionStarted {
        message: started.message,
        mission: started.mission,
    }))
}

pub(crate) async fn api_mission_complete(
    State(app): State<Arc<ZonesApp>>,
    body: Bytes,
) -> Result<Json<ZoneCompletion>, ApiError> {
    let input: CompleteZoneMissionRequest = optional_json(&body)?;
    let mut game = app.game();
    let outcome = game.complete_mission(input.success)?;
    let state = game.state().clone();

    Ok(Json(match outcome {
        ZoneOutcome::Failed => ZoneCompletion::Failed(StateUpdate::new("Misión fallida", state)),
        ZoneOutcome::Completed {
            mission,
            message,
            all_completed,
        } => ZoneCompletion::Completed(MissionCompleted {
            message,
            completed_mission: mission,
            state,
            all_completed: Some(all_completed),
        }),
    }))
}

pub(crate) async fn api_game_reset(
    State(app): State<Arc<ZonesApp>>,
) -> Json<StateUpdate<ZoneState>> {
    let state = app.game().reset().clone();
    Json(StateUpdate::new("Juego reiniciado", state))
}

pub(crate) async fn api_ecobot_message(State(app): State<Arc<ZonesApp>>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: app.game().message().to_string(),
    })
}
