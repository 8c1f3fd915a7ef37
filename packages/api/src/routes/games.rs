use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use shared::models::game::requests::{CreateGameRequest, JoinGameRequest, MoveRequest};
use shared::models::game::responses::{
    CreateGameResponse, GameResponse, GameStateResponse, HistoryResponse, ResetResponse,
};
use shared::services::errors::game_service_errors::GameServiceError;

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_game))
        .route("/join", post(join_game))
        .route("/move", post(make_move))
        // exact segment must win over the id capture below
        .route("/history", get(get_history))
        .route("/:game_id", get(get_game))
        .route("/reset", post(reset_games))
}

async fn create_game(
    State(state): State<AppState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let game = state.game_service.create_game(&payload.player_name).await?;
    Ok(Json(CreateGameResponse {
        success: true,
        game_id: game.id.clone(),
        game,
    }))
}

async fn join_game(
    State(state): State<AppState>,
    Json(payload): Json<JoinGameRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = state
        .game_service
        .join_game(&payload.game_id, &payload.player_name)
        .await?;
    Ok(Json(GameResponse {
        success: true,
        game,
    }))
}

async fn make_move(
    State(state): State<AppState>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let (row, col) = match (payload.row, payload.col) {
        (Some(row), Some(col)) => (row, col),
        _ => {
            return Err(GameServiceError::ValidationError(
                "Missing required fields".to_string(),
            )
            .into())
        }
    };

    let game = state
        .game_service
        .make_move(&payload.game_id, &payload.player_name, row, col)
        .await?;
    Ok(Json(GameResponse {
        success: true,
        game,
    }))
}

async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let game = state.game_service.get_game(&game_id).await?;
    Ok(Json(GameStateResponse { game }))
}

async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let games = state.game_service.get_history().await?;
    Ok(Json(HistoryResponse { games }))
}

async fn reset_games(State(state): State<AppState>) -> Result<Json<ResetResponse>, ApiError> {
    state.game_service.reset_all().await?;
    Ok(Json(ResetResponse { success: true }))
}
