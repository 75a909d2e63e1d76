use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ecobot_engine::{ErrorKind, GameError};
use ecobot_protocol::ErrorBody;
use serde::de::DeserializeOwned;

/// A rejected request: status plus the text placed in `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(StatusCode::BAD_REQUEST, msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorBody::new(self.1))).into_response()
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let status = match err.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        };
        Self(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Parse a JSON body that clients may leave out entirely.
pub fn optional_json<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecobot_protocol::CompleteZoneMissionRequest;

    #[test]
    fn game_errors_map_to_statuses() {
        let cases = [
            (GameError::ZoneNotFound("x".into()), StatusCode::NOT_FOUND),
            (GameError::ZoneLocked("x".into()), StatusCode::FORBIDDEN),
            (GameError::ZoneCompleted("x".into()), StatusCode::BAD_REQUEST),
            (GameError::NoActiveMission, StatusCode::BAD_REQUEST),
            (GameError::BuildingNotFound("x".into()), StatusCode::NOT_FOUND),
            (GameError::MissionNotFound(9), StatusCode::NOT_FOUND),
            (GameError::UnknownDirection("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).0, status);
        }
    }

    #[test]
    fn empty_body_uses_default() {
        let req: CompleteZoneMissionRequest = optional_json(&Bytes::new()).unwrap();
        assert!(!req.success);
        let req: CompleteZoneMissionRequest =
            optional_json(&Bytes::from_static(br#"{"success":true}"#)).unwrap();
        assert!(req.success);
        let err = optional_json::<CompleteZoneMissionRequest>(&Bytes::from_static(b"{nope"))
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }
}
