use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Wire code used by `GameState`: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Black),
            2 => Some(Self::White),
            _ => None,
        }
    }
}

/// Content of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the side that just moved goes again because the opponent had to pass.
    /// - `false` after a normal hand-over of the turn.
    pub is_pass: bool,
    /// Cells (0..=63) flipped by the last move. Empty after a restart.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0=draw, 1=black, 2=white.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}

/// Errors raised by the game session. The board engine itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotHumanTurn,

    #[error("it is not the computer's turn")]
    NotComputerTurn,

    #[error("row/col out of range: ({0}, {1})")]
    OutOfRange(u8, u8),

    #[error("illegal move at ({0}, {1})")]
    IllegalMove(u8, u8),

    #[error("computer has no legal moves")]
    NoLegalMove,

    #[error("computer could not select a move")]
    SelectorFailed,

    #[error("computer selected an illegal move at ({0}, {1})")]
    SelectorIllegalMove(u8, u8),
}
