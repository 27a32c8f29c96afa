use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use game::{GameInstance, GreedyMoveSelector, MoveSelector};
pub use types::{Cell, GameError, GameResult, GameState, Player, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
