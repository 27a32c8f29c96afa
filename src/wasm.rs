//! WASM bindings for the game session.
//!
//! Players cross the boundary as codes: 1 = black, 2 = white.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::GameInstance;
use crate::types::Player;

#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl WasmGame {
    /// Accepts an optional `{ human, replyDelayMs }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        Ok(WasmGame {
            inner: GameInstance::new_with_default_selector(config),
        })
    }

    /// Human move. Throws on an illegal move or when it is not the human's turn.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), JsError> {
        self.inner.place(row, col)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<(), JsError> {
        self.inner.do_ai_move()?;
        Ok(())
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_state())
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_result())
    }

    /// Legal moves for the side to move, as `[{ row, col }]`.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.legal_moves())
    }

    #[wasm_bindgen(js_name = isValidMove)]
    pub fn is_valid_move(&self, row: u8, col: u8, player: u8) -> bool {
        Player::from_code(player)
            .is_some_and(|player| self.inner.board().is_valid_move(row, col, player))
    }

    /// `{ row, col }`, or `undefined` when the player has no legal move.
    #[wasm_bindgen(js_name = greedyMove)]
    pub fn greedy_move(&self, player: u8) -> Result<JsValue, JsError> {
        let player = parse_player(player)?;
        to_js(&self.inner.board().greedy_move(player))
    }

    #[wasm_bindgen(js_name = hasValidMove)]
    pub fn has_valid_move(&self, player: u8) -> Result<bool, JsError> {
        Ok(self.inner.board().has_valid_move(parse_player(player)?))
    }

    #[wasm_bindgen(js_name = countPieces)]
    pub fn count_pieces(&self, player: u8) -> Result<u8, JsError> {
        Ok(self.inner.board().count_pieces(parse_player(player)?))
    }

    #[wasm_bindgen(js_name = isComputerTurn)]
    pub fn is_computer_turn(&self) -> bool {
        self.inner.is_computer_turn()
    }

    #[wasm_bindgen(js_name = replyDelayMs)]
    pub fn reply_delay_ms(&self) -> u32 {
        self.inner.reply_delay_ms()
    }
}

fn parse_player(code: u8) -> Result<Player, JsError> {
    Player::from_code(code).ok_or_else(|| JsError::new(&format!("invalid player code: {code}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error(err: serde_wasm_bindgen::Error) -> JsError {
    JsError::new(&err.to_string())
}
