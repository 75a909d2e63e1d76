use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveRequest {
    /// `left`, `right`, `up` or `down`; anything else leaves the player in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartZoneRequest {
    pub zone_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteZoneMissionRequest {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleBuildingRequest {
    pub building: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartMissionRequest {
    pub mission_id: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteMissionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// `{ message, state }`, returned by resets, failed missions and building toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateUpdate<S> {
    pub message: String,
    pub state: S,
}

impl<S> StateUpdate<S> {
    pub fn new(message: impl Into<String>, state: S) -> Self {
        Self {
            message: message.into(),
            state,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionResponse<P> {
    pub position: P,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionStarted<M> {
    pub message: String,
    pub mission: M,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionCompleted<M, S> {
    pub message: String,
    pub completed_mission: M,
    pub state: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionList<M> {
    pub missions: Vec<M>,
}

/// Planet state as served by `GET /api/game/state`: the state fields plus one advice line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisedState<S> {
    #[serde(flatten)]
    pub state: S,
    pub ecobot_advice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
    pub timestamp: String,
}

pub mod routes {
    pub const HEALTH: &str = "/health";
    pub const GAME_STATE: &str = "/api/game/state";
    pub const GAME_RESET: &str = "/api/game/reset";

    pub const PLAYER_MOVE: &str = "/api/player/move";
    pub const ZONE_START: &str = "/api/zone/start";
    pub const MISSION_COMPLETE: &str = "/api/mission/complete";
    pub const ECOBOT_MESSAGE: &str = "/api/ecobot/message";

    pub const BUILDINGS_TOGGLE: &str = "/api/buildings/toggle";
    pub const MISSIONS_AVAILABLE: &str = "/api/missions/available";
    pub const MISSIONS_START: &str = "/api/missions/start";
    pub const MISSIONS_COMPLETE: &str = "/api/missions/complete";
    pub const ECOBOT_ADVICE: &str = "/api/ecobot/advice";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_request_direction_is_optional() {
        let req: MoveRequest = serde_json::from_str(r#"{"direction":"diagonal"}"#).unwrap();
        assert_eq!(req.direction.as_deref(), Some("diagonal"));
        let req: MoveRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.direction, None);
    }

    #[test]
    fn missing_success_means_failure() {
        let req: CompleteZoneMissionRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.success);
    }

    #[test]
    fn advised_state_flattens_state_fields() {
        let body = AdvisedState {
            state: serde_json::json!({ "energy": 100.0, "level": 1 }),
            ecobot_advice: "hi".to_string(),
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["energy"], 100.0);
        assert_eq!(v["level"], 1);
        assert_eq!(v["ecobot_advice"], "hi");
    }

    #[test]
    fn all_completed_is_omitted_when_absent() {
        let body = MissionCompleted {
            message: "ok".to_string(),
            completed_mission: 1,
            state: 2,
            all_completed: None,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert!(v.get("all_completed").is_none());
    }
}
