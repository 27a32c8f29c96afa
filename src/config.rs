use serde::Deserialize;

use crate::types::Player;

pub const DEFAULT_REPLY_DELAY_MS: u32 = 700;

/// Session settings passed in by the host page. Missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Side played by the human. The computer takes the other one.
    pub human: Player,
    /// Pause the UI should leave before showing the computer's reply.
    /// The engine never sleeps.
    pub reply_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human: Player::Black,
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn computer(&self) -> Player {
        self.human.opponent()
    }
}
