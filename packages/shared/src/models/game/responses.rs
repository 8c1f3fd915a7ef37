use serde::{Deserialize, Serialize};

use crate::models::game::Game;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub success: bool,
    pub game_id: String,
    pub game: Game,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub success: bool,
    pub game: Game,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub game: Game,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub games: Vec<Game>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
