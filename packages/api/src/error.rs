use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use shared::models::game::responses::ErrorResponse;
use shared::services::errors::game_service_errors::GameServiceError;

#[derive(Debug)]
pub enum ApiError {
    GameService(GameServiceError),
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::GameService(err) = self;
        let (status, message) = match &err {
            GameServiceError::ValidationError(_)
            | GameServiceError::GameFull
            | GameServiceError::PlayerAlreadyJoined
            | GameServiceError::PlayerNotInGame
            | GameServiceError::NotYourTurn
            | GameServiceError::CellOccupied
            | GameServiceError::GameCompleted
            | GameServiceError::InvalidPosition => (StatusCode::BAD_REQUEST, err.to_string()),

            GameServiceError::GameNotFound => (StatusCode::NOT_FOUND, err.to_string()),

            // Backend details stay in the log, never in the response body.
            GameServiceError::RepositoryError(detail) => {
                error!("Repository failure: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
