use log::{debug, info};

use crate::board::{BOARD_SIZE, Board, mask_to_indices};
use crate::config::GameConfig;
use crate::types::{GameError, GameResult, GameState, Player, Position};

/// Chooses the computer's move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position>;
}

/// One-ply greedy opponent: maximizes stones flipped by the move.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyMoveSelector;

impl MoveSelector for GreedyMoveSelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        board.greedy_move(player)
    }
}

/// A human-versus-computer game on top of [`Board`].
///
/// Turn order is tracked here, not on the board: after every move the side
/// without a legal reply passes automatically, and the game ends once neither
/// side can move.
pub struct GameInstance {
    board: Board,
    config: GameConfig,
    pub current_player: Player,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<u8>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            config,
            current_player: Player::Black,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            selector,
        }
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        Self::new(config, Box::new(GreedyMoveSelector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn reply_delay_ms(&self) -> u32 {
        self.config.reply_delay_ms
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.is_game_over && self.current_player == self.config.computer()
    }

    /// Human move.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.current_player != self.config.human {
            return Err(GameError::NotHumanTurn);
        }
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(GameError::OutOfRange(row, col));
        }

        self.apply_move(Position::new(row, col), self.config.human)
    }

    pub fn do_ai_move(&mut self) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        let computer = self.config.computer();
        if self.current_player != computer {
            return Err(GameError::NotComputerTurn);
        }
        if !self.board.has_valid_move(computer) {
            return Err(GameError::NoLegalMove);
        }

        let selected = self
            .selector
            .select_move(&self.board, computer)
            .ok_or(GameError::SelectorFailed)?;

        if !self.board.is_valid_move(selected.row, selected.col, computer) {
            return Err(GameError::SelectorIllegalMove(selected.row, selected.col));
        }

        self.apply_move(selected, computer)
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_game_over {
            return Vec::new();
        }
        self.board.valid_moves(self.current_player)
    }

    /// Starts over from the initial position. The configured sides are kept.
    pub fn restart(&mut self) {
        self.board.reset();
        self.current_player = Player::Black;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
        info!("game restarted");
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult {
            winner: if black_count > white_count {
                Player::Black.code()
            } else if white_count > black_count {
                Player::White.code()
            } else {
                0
            },
            black_count,
            white_count,
        }
    }

    fn apply_move(&mut self, mv: Position, player: Player) -> Result<(), GameError> {
        let flips = self.board.place(mv.row, mv.col, player);
        if flips == 0 {
            return Err(GameError::IllegalMove(mv.row, mv.col));
        }

        self.flipped = mask_to_indices(flips);
        debug!(
            "{player:?} plays ({}, {}), flipping {}",
            mv.row,
            mv.col,
            self.flipped.len()
        );
        self.advance_turn(player);

        Ok(())
    }

    fn advance_turn(&mut self, mover: Player) {
        let next = mover.opponent();
        if self.board.has_valid_move(next) {
            self.current_player = next;
            self.is_pass = false;
        } else if self.board.has_valid_move(mover) {
            debug!("{next:?} has no legal move and passes");
            self.current_player = mover;
            self.is_pass = true;
        } else {
            self.current_player = next;
            self.is_pass = false;
            self.is_game_over = true;
            let (black, white) = self.board.count();
            info!("game over: black {black}, white {white}");
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BOARD: u64 = u64::MAX;

    struct FixedMoveSelector {
        mv: Option<Position>,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _board: &Board, _player: Player) -> Option<Position> {
            self.mv
        }
    }

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * BOARD_SIZE + col)
    }

    fn new_game() -> GameInstance {
        GameInstance::new_with_default_selector(GameConfig::default())
    }

    #[test]
    fn initial_state_is_correct() {
        let game = new_game();
        let state = game.to_game_state();

        assert_eq!(state.current_player, 1);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
        assert!(!game.is_computer_turn());
        assert_eq!(game.reply_delay_ms(), 700);
    }

    #[test]
    fn human_move_hands_turn_to_computer() {
        let mut game = new_game();

        game.place(2, 3).unwrap();

        assert_eq!(game.current_player, Player::White);
        assert!(game.is_computer_turn());
        assert_eq!(game.flipped, vec![27]);
        assert_eq!(game.board().count(), (4, 1));
    }

    #[test]
    fn computer_replies_with_greedy_move() {
        let mut game = new_game();
        game.place(2, 3).unwrap();
        let expected = game.board().greedy_move(Player::White).unwrap();

        game.do_ai_move().unwrap();

        assert_eq!(
            game.board().cell(expected.row, expected.col),
            Some(crate::types::Cell::White)
        );
        assert_eq!(game.current_player, Player::Black);
        assert!(!game.is_pass);
    }

    #[test]
    fn illegal_player_move_returns_error() {
        let mut game = new_game();

        assert_eq!(game.place(0, 0), Err(GameError::IllegalMove(0, 0)));
        assert_eq!(game.place(3, 3), Err(GameError::IllegalMove(3, 3)));
        assert_eq!(game.place(8, 2), Err(GameError::OutOfRange(8, 2)));
        assert_eq!(game.to_game_state().black_count, 2);
    }

    #[test]
    fn turn_order_is_enforced() {
        let mut game = new_game();

        assert_eq!(game.do_ai_move(), Err(GameError::NotComputerTurn));
        game.place(2, 3).unwrap();
        assert_eq!(game.place(2, 2), Err(GameError::NotHumanTurn));
    }

    #[test]
    fn human_playing_white_lets_computer_open() {
        let config = GameConfig {
            human: Player::White,
            ..GameConfig::default()
        };
        let mut game = GameInstance::new_with_default_selector(config);

        assert!(game.is_computer_turn());
        game.do_ai_move().unwrap();

        assert_eq!(game.board().count(), (4, 1));
        assert_eq!(game.current_player, Player::White);
        assert!(!game.is_computer_turn());
    }

    #[test]
    fn opponent_without_moves_passes_back_to_mover() {
        let mut game = new_game();
        // After Black takes (0,1), White's only stone sits next to a black
        // stone backed by the board edge, so White cannot capture anything.
        let black = bit(0, 2) | bit(7, 0);
        let white = bit(0, 1) | bit(7, 1);
        game.set_board_for_test(Board::from_bitboards(black, white), Player::Black);

        game.place(0, 0).unwrap();

        assert!(game.is_pass);
        assert_eq!(game.current_player, Player::Black);
        assert!(!game.is_game_over);
        assert_eq!(game.legal_moves(), vec![Position::new(7, 2)]);

        game.place(7, 2).unwrap();
        assert!(game.is_game_over);
        assert_eq!(game.to_game_result().winner, 1);
    }

    #[test]
    fn both_sides_stuck_ends_game() {
        let mut game = new_game();
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        game.set_board_for_test(Board::from_bitboards(black, white), Player::White);

        assert!(game.is_computer_turn());
        game.do_ai_move().unwrap();
        let state = game.to_game_state();

        assert!(state.is_game_over);
        assert_eq!(state.black_count, 0);
        assert_eq!(state.white_count, 64);
        assert_eq!(state.flipped, vec![1]);
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.place(0, 0), Err(GameError::GameOver));
        assert_eq!(game.do_ai_move(), Err(GameError::GameOver));
        assert_eq!(game.to_game_result().winner, 2);
    }

    #[test]
    fn computer_without_moves_reports_error() {
        let mut game = new_game();
        let black = FULL_BOARD ^ bit(0, 0);
        game.set_board_for_test(Board::from_bitboards(black, 0), Player::White);

        assert_eq!(game.do_ai_move(), Err(GameError::NoLegalMove));
    }

    #[test]
    fn selector_failures_are_rejected() {
        let mut game = GameInstance::new(
            GameConfig::default(),
            Box::new(FixedMoveSelector { mv: None }),
        );
        game.place(2, 3).unwrap();
        assert_eq!(game.do_ai_move(), Err(GameError::SelectorFailed));

        let mut game = GameInstance::new(
            GameConfig::default(),
            Box::new(FixedMoveSelector {
                mv: Some(Position::new(0, 0)),
            }),
        );
        game.place(2, 3).unwrap();
        let before = game.to_game_state();
        assert_eq!(game.do_ai_move(), Err(GameError::SelectorIllegalMove(0, 0)));
        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn restart_restores_initial_state() {
        let mut game = new_game();
        game.place(2, 3).unwrap();
        game.do_ai_move().unwrap();

        game.restart();

        assert_eq!(game.to_game_state(), new_game().to_game_state());
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn draw_has_no_winner() {
        let mut game = new_game();
        let black = 0x0000_0000_FFFF_FFFF;
        game.set_board_for_test(Board::from_bitboards(black, !black), Player::Black);

        let result = game.to_game_result();

        assert_eq!(result.winner, 0);
        assert_eq!((result.black_count, result.white_count), (32, 32));
    }

    #[test]
    fn full_game_against_itself_terminates() {
        let mut game = new_game();

        for _ in 0..128 {
            if game.is_game_over {
                break;
            }
            if game.is_computer_turn() {
                game.do_ai_move().unwrap();
            } else {
                let mv = game.board().greedy_move(Player::Black).unwrap();
                game.place(mv.row, mv.col).unwrap();
            }
        }

        assert!(game.is_game_over);
        let board = game.board();
        assert!(!board.has_valid_move(Player::Black));
        assert!(!board.has_valid_move(Player::White));
        let result = game.to_game_result();
        assert_eq!(
            result.black_count as usize + result.white_count as usize + board.empty_count() as usize,
            64
        );
    }
}
