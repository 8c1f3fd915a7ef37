use crate::models::game::{Board, Winner};

/// Tic-tac-toe rules engine: outcome detection over a 3x3 board.
/// Stateless; `evaluate` is total and never fails.
#[derive(Clone)]
pub struct BoardService;

impl BoardService {
    pub fn new() -> Self {
        BoardService
    }

    /// Evaluate a board for a finished line or a draw.
    ///
    /// Rows and columns are scanned index by index, then both diagonals.
    /// A full board with no complete line is a draw; anything else is
    /// still ongoing (`None`).
    pub fn evaluate(board: &Board) -> Option<Winner> {
        for i in 0..3 {
            if let Some(symbol) = board[i][0] {
                if board[i][1] == Some(symbol) && board[i][2] == Some(symbol) {
                    return Some(symbol.into());
                }
            }
            if let Some(symbol) = board[0][i] {
                if board[1][i] == Some(symbol) && board[2][i] == Some(symbol) {
                    return Some(symbol.into());
                }
            }
        }

        if let Some(symbol) = board[1][1] {
            if (board[0][0] == Some(symbol) && board[2][2] == Some(symbol))
                || (board[0][2] == Some(symbol) && board[2][0] == Some(symbol))
            {
                return Some(symbol.into());
            }
        }

        if board.iter().flatten().all(|cell| cell.is_some()) {
            return Some(Winner::Draw);
        }

        None
    }
}

impl Default for BoardService {
    fn default() -> Self {
        Self::new()
    }
}
