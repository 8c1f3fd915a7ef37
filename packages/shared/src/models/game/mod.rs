use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod requests;
pub mod responses;

/// A mark on the board. The first player to join a game plays X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn opponent(&self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// Final outcome of a game. Serialized into the `winner` field as
/// `"X"`, `"O"` or `"draw"`; an ongoing game carries `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl From<Symbol> for Winner {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Winner::X,
            Symbol::O => Winner::O,
        }
    }
}

/// 3x3 grid; `None` is an empty cell.
pub type Board = [[Option<Symbol>; 3]; 3];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub players: Vec<String>,
    pub board: Board,
    pub current_player: Symbol,
    pub winner: Option<Winner>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(player_name: &str) -> Self {
        Game {
            id: Uuid::new_v4().to_string(),
            players: vec![player_name.to_string()],
            board: [[None; 3]; 3],
            current_player: Symbol::X,
            winner: None,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Symbol assignment is positional: players[0] plays X, players[1]
    /// plays O. Returns `None` for anyone not in the game.
    pub fn symbol_for(&self, player_name: &str) -> Option<Symbol> {
        match self.players.iter().position(|p| p == player_name) {
            Some(0) => Some(Symbol::X),
            Some(1) => Some(Symbol::O),
            _ => None,
        }
    }

    /// Structural check applied to documents read back from storage.
    pub fn is_well_formed(&self) -> bool {
        !self.players.is_empty()
            && self.players.len() <= 2
            && !(self.players.len() == 2 && self.players[0] == self.players[1])
    }
}

/// Merge-patch carrier for [`Game`] updates: only fields that are `Some`
/// are written, everything else is left untouched.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub players: Option<Vec<String>>,
    pub board: Option<Board>,
    pub current_player: Option<Symbol>,
    pub winner: Option<Winner>,
    pub completed: Option<bool>,
}

impl GamePatch {
    pub fn apply_to(&self, game: &mut Game) {
        if let Some(players) = &self.players {
            game.players = players.clone();
        }
        if let Some(board) = self.board {
            game.board = board;
        }
        if let Some(current_player) = self.current_player {
            game.current_player = current_player;
        }
        if let Some(winner) = self.winner {
            game.winner = Some(winner);
        }
        if let Some(completed) = self.completed {
            game.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_fields() {
        let game = Game::new("Alice");

        assert!(!game.id.is_empty());
        assert_eq!(game.players, vec!["Alice".to_string()]);
        assert!(game.board.iter().flatten().all(|cell| cell.is_none()));
        assert_eq!(game.current_player, Symbol::X);
        assert!(game.winner.is_none());
        assert!(!game.completed);

        // created_at should be recent
        let now = Utc::now();
        assert!((now - game.created_at).num_seconds() < 10);
    }

    #[test]
    fn test_game_id_uniqueness() {
        let game1 = Game::new("Alice");
        let game2 = Game::new("Alice");

        assert_ne!(game1.id, game2.id);
    }

    #[test]
    fn test_symbol_assignment_is_positional() {
        let mut game = Game::new("Alice");
        game.players.push("Bob".to_string());

        assert_eq!(game.symbol_for("Alice"), Some(Symbol::X));
        assert_eq!(game.symbol_for("Bob"), Some(Symbol::O));
        assert_eq!(game.symbol_for("Carol"), None);
    }

    #[test]
    fn test_game_serialization() {
        let mut game = Game::new("Alice");
        game.board[0][0] = Some(Symbol::X);

        let serialized = serde_json::to_string(&game).unwrap();
        assert!(serialized.contains("\"currentPlayer\":\"X\""));
        assert!(serialized.contains("\"createdAt\""));
        assert!(serialized.contains("\"winner\":null"));
        assert!(serialized.contains("[\"X\",null,null]"));

        let deserialized: Game = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.id, game.id);
        assert_eq!(deserialized.players, game.players);
        assert_eq!(deserialized.board, game.board);
        assert_eq!(deserialized.created_at, game.created_at);
    }

    #[test]
    fn test_winner_serialization() {
        assert_eq!(serde_json::to_string(&Winner::X).unwrap(), "\"X\"");
        assert_eq!(serde_json::to_string(&Winner::O).unwrap(), "\"O\"");
        assert_eq!(serde_json::to_string(&Winner::Draw).unwrap(), "\"draw\"");

        let deserialized: Winner = serde_json::from_str("\"draw\"").unwrap();
        assert_eq!(deserialized, Winner::Draw);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut game = Game::new("Alice");
        let created_at = game.created_at;

        let patch = GamePatch {
            current_player: Some(Symbol::O),
            completed: Some(true),
            ..GamePatch::default()
        };
        patch.apply_to(&mut game);

        assert_eq!(game.current_player, Symbol::O);
        assert!(game.completed);
        // untouched fields keep their values
        assert_eq!(game.players, vec!["Alice".to_string()]);
        assert!(game.winner.is_none());
        assert_eq!(game.created_at, created_at);
    }

    #[test]
    fn test_patch_never_clears_winner() {
        let mut game = Game::new("Alice");
        game.winner = Some(Winner::X);

        GamePatch::default().apply_to(&mut game);

        assert_eq!(game.winner, Some(Winner::X));
    }

    #[test]
    fn test_is_well_formed() {
        let mut game = Game::new("Alice");
        assert!(game.is_well_formed());

        game.players.push("Bob".to_string());
        assert!(game.is_well_formed());

        game.players.push("Carol".to_string());
        assert!(!game.is_well_formed());

        game.players = vec![];
        assert!(!game.is_well_formed());

        game.players = vec!["Alice".to_string(), "Alice".to_string()];
        assert!(!game.is_well_formed());
    }
}
