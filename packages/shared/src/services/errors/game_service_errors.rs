use crate::repositories::errors::game_repository_errors::GameRepositoryError;

#[derive(Debug)]
pub enum GameServiceError {
    ValidationError(String),
    GameNotFound,
    GameFull,
    PlayerAlreadyJoined,
    PlayerNotInGame,
    NotYourTurn,
    CellOccupied,
    GameCompleted,
    InvalidPosition,
    RepositoryError(String),
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::ValidationError(msg) => write!(f, "{}", msg),
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::GameFull => write!(f, "Game is full"),
            GameServiceError::PlayerAlreadyJoined => write!(f, "Player already in game"),
            GameServiceError::PlayerNotInGame => write!(f, "Player not in game"),
            GameServiceError::NotYourTurn => write!(f, "Not your turn"),
            GameServiceError::CellOccupied => write!(f, "Cell already occupied"),
            GameServiceError::GameCompleted => write!(f, "Game is completed"),
            GameServiceError::InvalidPosition => {
                write!(f, "Row and column must be between 0 and 2")
            }
            GameServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        match err {
            GameRepositoryError::NotFound => GameServiceError::GameNotFound,
            _ => GameServiceError::RepositoryError(err.to_string()),
        }
    }
}
