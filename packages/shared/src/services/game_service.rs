use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::game::{Game, GamePatch};
use crate::repositories::game_repository::GameRepository;
use crate::services::board_service::BoardService;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::realtime_service::RealtimeService;

/// Orchestrates the game lifecycle: create/join/move/read against the
/// repository, with the board service deciding outcomes and the realtime
/// service fanning state changes out to the game's room.
#[derive(Clone)]
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    realtime: Arc<RealtimeService>,
    // One mutation in flight per game id. The guard is held through the
    // write and the broadcast so room events arrive in persistence order.
    game_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl GameService {
    pub fn new(
        repository: Arc<dyn GameRepository + Send + Sync>,
        realtime: Arc<RealtimeService>,
    ) -> Self {
        GameService {
            repository,
            realtime,
            game_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn lock_for(&self, game_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.game_locks.lock().await;
        locks
            .entry(game_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub async fn create_game(&self, player_name: &str) -> Result<Game, GameServiceError> {
        if player_name.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Missing playerName".to_string(),
            ));
        }

        let game = Game::new(player_name);
        self.repository.create_game(&game).await?;
        info!("Game {} created by {}", game.id, player_name);

        self.realtime
            .broadcast(
                &game.id,
                "gameCreated",
                json!({ "gameId": game.id, "game": game }),
            )
            .await;

        Ok(game)
    }

    pub async fn join_game(
        &self,
        game_id: &str,
        player_name: &str,
    ) -> Result<Game, GameServiceError> {
        if game_id.is_empty() || player_name.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Missing gameId or playerName".to_string(),
            ));
        }

        let lock = self.lock_for(game_id).await;
        let _guard = lock.lock().await;

        let mut game = self
            .repository
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;

        if game.players.len() >= 2 {
            return Err(GameServiceError::GameFull);
        }
        if game.players.iter().any(|p| p == player_name) {
            return Err(GameServiceError::PlayerAlreadyJoined);
        }

        game.players.push(player_name.to_string());
        let patch = GamePatch {
            players: Some(game.players.clone()),
            ..GamePatch::default()
        };
        self.repository.update_game(game_id, &patch).await?;
        info!("Player {} joined game {}", player_name, game_id);

        self.realtime
            .broadcast(
                game_id,
                "playerJoined",
                json!({ "gameId": game_id, "playerName": player_name }),
            )
            .await;

        Ok(game)
    }

    pub async fn make_move(
        &self,
        game_id: &str,
        player_name: &str,
        row: i32,
        col: i32,
    ) -> Result<Game, GameServiceError> {
        if game_id.is_empty() || player_name.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Missing required fields".to_string(),
            ));
        }
        if !(0..=2).contains(&row) || !(0..=2).contains(&col) {
            return Err(GameServiceError::InvalidPosition);
        }
        let (row, col) = (row as usize, col as usize);

        let lock = self.lock_for(game_id).await;
        let _guard = lock.lock().await;

        let mut game = self
            .repository
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;

        if game.completed {
            return Err(GameServiceError::GameCompleted);
        }
        let symbol = game
            .symbol_for(player_name)
            .ok_or(GameServiceError::PlayerNotInGame)?;
        if game.current_player != symbol {
            return Err(GameServiceError::NotYourTurn);
        }
        if game.board[row][col].is_some() {
            return Err(GameServiceError::CellOccupied);
        }

        game.board[row][col] = Some(symbol);
        // The turn passes before the outcome check; once a game completes,
        // `winner` is the authoritative field, not `current_player`.
        game.current_player = game.current_player.opponent();
        game.winner = BoardService::evaluate(&game.board);
        game.completed = game.winner.is_some();

        let patch = GamePatch {
            board: Some(game.board),
            current_player: Some(game.current_player),
            winner: game.winner,
            completed: Some(game.completed),
            ..GamePatch::default()
        };
        self.repository.update_game(game_id, &patch).await?;
        info!(
            "Player {} placed {:?} at ({}, {}) in game {}",
            player_name, symbol, row, col, game_id
        );

        self.realtime
            .broadcast(
                game_id,
                "moveMade",
                json!({
                    "gameId": game_id,
                    "row": row,
                    "col": col,
                    "symbol": symbol,
                    "winner": game.winner,
                }),
            )
            .await;

        Ok(game)
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game, GameServiceError> {
        if game_id.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Missing gameId".to_string(),
            ));
        }
        self.repository
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)
    }

    /// Completed games, newest first.
    pub async fn get_history(&self) -> Result<Vec<Game>, GameServiceError> {
        Ok(self.repository.list_completed_games().await?)
    }

    /// Administrative wipe of every game. No broadcast.
    pub async fn reset_all(&self) -> Result<(), GameServiceError> {
        self.repository.clear_games().await?;
        self.game_locks.lock().await.clear();
        info!("All games cleared");
        Ok(())
    }
}
