use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

use crate::models::game::{Game, GamePatch};
use crate::repositories::errors::game_repository_errors::GameRepositoryError;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait GameRepository: Send + Sync {
    /// Insert a new game document. An existing id is rejected with
    /// `AlreadyExists`.
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError>;

    /// Merge-patch the stored document: only the fields present in the
    /// patch are written. Fails with `NotFound` if the id is absent.
    async fn update_game(
        &self,
        game_id: &str,
        patch: &GamePatch,
    ) -> Result<(), GameRepositoryError>;

    /// All completed games, newest first.
    async fn list_completed_games(&self) -> Result<Vec<Game>, GameRepositoryError>;

    async fn clear_games(&self) -> Result<(), GameRepositoryError>;
}

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item =
            to_item(game).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailed") {
                    GameRepositoryError::AlreadyExists
                } else {
                    GameRepositoryError::DynamoDb(error_str)
                }
            })?;

        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(game_id)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = output.item {
            let game: Game = from_item(item)
                .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            if !game.is_well_formed() {
                return Err(GameRepositoryError::Serialization(format!(
                    "Corrupt game document for id {}",
                    game_id
                )));
            }
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    async fn update_game(
        &self,
        game_id: &str,
        patch: &GamePatch,
    ) -> Result<(), GameRepositoryError> {
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(game_id)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .condition_expression("attribute_exists(id)");

        let mut clauses = Vec::new();
        if let Some(players) = &patch.players {
            clauses.push("players = :players");
            request = request.expression_attribute_values(
                ":players",
                to_attribute_value(players)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            );
        }
        if let Some(board) = &patch.board {
            clauses.push("board = :board");
            request = request.expression_attribute_values(
                ":board",
                to_attribute_value(board)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            );
        }
        if let Some(current_player) = &patch.current_player {
            clauses.push("currentPlayer = :currentPlayer");
            request = request.expression_attribute_values(
                ":currentPlayer",
                to_attribute_value(current_player)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            );
        }
        if let Some(winner) = &patch.winner {
            clauses.push("winner = :winner");
            request = request.expression_attribute_values(
                ":winner",
                to_attribute_value(winner)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            );
        }
        if let Some(completed) = &patch.completed {
            clauses.push("completed = :completed");
            request = request.expression_attribute_values(
                ":completed",
                to_attribute_value(completed)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            );
        }

        if clauses.is_empty() {
            return Ok(());
        }

        request
            .update_expression(format!("SET {}", clauses.join(", ")))
            .send()
            .await
            .map_err(|e| {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailed") {
                    GameRepositoryError::NotFound
                } else {
                    GameRepositoryError::DynamoDb(error_str)
                }
            })?;

        Ok(())
    }

    async fn list_completed_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("completed = :completed")
                .expression_attribute_values(
                    ":completed",
                    to_attribute_value(true)
                        .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
                )
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                let game: Game = from_item(item)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                games.push(game);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(games)
    }

    async fn clear_games(&self) -> Result<(), GameRepositoryError> {
        let mut exclusive_start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .projection_expression("id")
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                if let Some(id) = item.get("id") {
                    self.client
                        .delete_item()
                        .table_name(&self.table_name)
                        .key("id", id.clone())
                        .send()
                        .await
                        .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;
                }
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(())
    }
}
