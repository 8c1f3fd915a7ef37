use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::game::{Game, GamePatch};
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::game_repository::GameRepository;

/// Process-local fallback store, selected at startup when no games table
/// is configured. Observable behavior matches the DynamoDB backend.
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<String, Game>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game.id) {
            return Err(GameRepositoryError::AlreadyExists);
        }
        games.insert(game.id.clone(), game.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        Ok(self.games.read().await.get(game_id).cloned())
    }

    async fn update_game(
        &self,
        game_id: &str,
        patch: &GamePatch,
    ) -> Result<(), GameRepositoryError> {
        let mut games = self.games.write().await;
        let game = games.get_mut(game_id).ok_or(GameRepositoryError::NotFound)?;
        patch.apply_to(game);
        Ok(())
    }

    async fn list_completed_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let games = self.games.read().await;
        let mut completed: Vec<Game> = games.values().filter(|g| g.completed).cloned().collect();
        completed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(completed)
    }

    async fn clear_games(&self) -> Result<(), GameRepositoryError> {
        self.games.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::{Symbol, Winner};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let repository = InMemoryGameRepository::new();
        let game = Game::new("Alice");

        repository.create_game(&game).await.unwrap();
        let stored = repository.get_game(&game.id).await.unwrap().unwrap();

        assert_eq!(stored.id, game.id);
        assert_eq!(stored.players, game.players);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repository = InMemoryGameRepository::new();
        let game = Game::new("Alice");

        repository.create_game(&game).await.unwrap();
        let result = repository.create_game(&game).await;

        assert!(matches!(result, Err(GameRepositoryError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_get_unknown_id_returns_none() {
        let repository = InMemoryGameRepository::new();

        assert!(repository.get_game("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_named_fields_only() {
        let repository = InMemoryGameRepository::new();
        let game = Game::new("Alice");
        repository.create_game(&game).await.unwrap();

        let patch = GamePatch {
            players: Some(vec!["Alice".to_string(), "Bob".to_string()]),
            ..GamePatch::default()
        };
        repository.update_game(&game.id, &patch).await.unwrap();

        let stored = repository.get_game(&game.id).await.unwrap().unwrap();
        assert_eq!(stored.players.len(), 2);
        assert_eq!(stored.current_player, Symbol::X);
        assert!(!stored.completed);
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let repository = InMemoryGameRepository::new();

        let result = repository.update_game("missing", &GamePatch::default()).await;

        assert!(matches!(result, Err(GameRepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_completed_newest_first() {
        let repository = InMemoryGameRepository::new();

        let mut older = Game::new("Alice");
        older.completed = true;
        older.winner = Some(Winner::X);
        older.created_at = Utc::now() - Duration::minutes(5);

        let mut newer = Game::new("Bob");
        newer.completed = true;
        newer.winner = Some(Winner::Draw);

        let ongoing = Game::new("Carol");

        repository.create_game(&older).await.unwrap();
        repository.create_game(&newer).await.unwrap();
        repository.create_game(&ongoing).await.unwrap();

        let completed = repository.list_completed_games().await.unwrap();

        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].id, newer.id);
        assert_eq!(completed[1].id, older.id);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let repository = InMemoryGameRepository::new();
        let game = Game::new("Alice");
        repository.create_game(&game).await.unwrap();

        repository.clear_games().await.unwrap();

        assert!(repository.get_game(&game.id).await.unwrap().is_none());
        assert!(repository.list_completed_games().await.unwrap().is_empty());
    }
}
