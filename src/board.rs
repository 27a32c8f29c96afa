use crate::types::{Cell, Player, Position};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards, bit index `row * 8 + col`.
///
/// The board is `Copy`, so every read accessor hands out a snapshot and callers
/// can never alias the engine's own grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
    /// Advisory only: move operations take the player explicitly.
    current_player: Player,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white, black to move.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
            current_player: Player::Black,
        }
    }

    /// Restores the initial configuration.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_valid_move(&self, row: u8, col: u8, player: Player) -> bool {
        match to_pos(row, col) {
            Some(pos) => self.flips(pos, player) != 0,
            None => false,
        }
    }

    /// Plays `player` at `(row, col)`.
    /// Returns `false` and leaves the board untouched when the move is illegal.
    pub fn make_move(&mut self, row: u8, col: u8, player: Player) -> bool {
        self.place(row, col, player) != 0
    }

    /// Places one stone and flips captured stones.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, row: u8, col: u8, player: Player) -> u64 {
        let Some(pos) = to_pos(row, col) else {
            return 0;
        };

        let flips = self.flips(pos, player);
        if flips == 0 {
            return 0;
        }

        let (me, opp) = self.sides(player);
        let next_me = me | bit(pos) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }
        self.current_player = player.opponent();

        flips
    }

    /// Cells that placing `player` at `(row, col)` would flip, in row-major order.
    pub fn flip_set(&self, row: u8, col: u8, player: Player) -> Vec<Position> {
        match to_pos(row, col) {
            Some(pos) => mask_to_positions(self.flips(pos, player)),
            None => Vec::new(),
        }
    }

    pub fn has_valid_move(&self, player: Player) -> bool {
        self.legal_moves(player) != 0
    }

    /// Legal moves in row-major scan order.
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        mask_to_positions(self.legal_moves(player))
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let mut legal = 0u64;
        for pos in 0..NUM_SQUARES {
            if self.flips(pos, player) != 0 {
                legal |= bit(pos);
            }
        }
        legal
    }

    /// One-ply greedy choice: the legal move flipping the most stones.
    /// Ties go to the first move in row-major order.
    pub fn greedy_move(&self, player: Player) -> Option<Position> {
        let mut best: Option<(usize, u32)> = None;

        for pos in 0..NUM_SQUARES {
            let flipped = self.flips(pos, player).count_ones();
            if flipped == 0 {
                continue;
            }
            if best.is_none_or(|(_, most)| flipped > most) {
                best = Some((pos, flipped));
            }
        }

        best.map(|(pos, _)| pos_to_position(pos))
    }

    pub fn count_pieces(&self, player: Player) -> u8 {
        let (me, _) = self.sides(player);
        me.count_ones() as u8
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Returns the content of one square, or `None` off the board.
    pub fn cell(&self, row: u8, col: u8) -> Option<Cell> {
        to_pos(row, col).map(|pos| self.cell_at(pos))
    }

    /// Copy of the whole grid, indexed `[row][col]`.
    pub fn cells(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.cell_at(row * BOARD_SIZE + col);
            }
        }
        grid
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = match self.cell_at(pos) {
                Cell::Empty => 0,
                Cell::Black => Player::Black.code(),
                Cell::White => Player::White.code(),
            };
        }
        board
    }

    #[cfg(test)]
    pub(crate) fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "bitboards overlap");
        Self {
            black,
            white,
            current_player: Player::Black,
        }
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn cell_at(&self, pos: usize) -> Cell {
        let square = bit(pos);
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    fn flips(&self, pos: usize, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        collect_flips(pos, me, opp)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a flip or move mask to positions, lowest index first.
pub fn mask_to_positions(mask: u64) -> Vec<Position> {
    mask_to_indices(mask)
        .into_iter()
        .map(|idx| pos_to_position(idx as usize))
        .collect()
}

pub fn mask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}

fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    if pos >= NUM_SQUARES {
        return 0;
    }

    let move_bit = bit(pos);
    if ((me | opp) & move_bit) != 0 {
        return 0;
    }

    let (row, col) = pos_to_row_col(pos);
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_SIZE + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else {
                // An empty line contributes nothing even when it ends on our own stone.
                if (me & square) != 0 {
                    flips |= line;
                }
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn to_pos(row: u8, col: u8) -> Option<usize> {
    let (row, col) = (row as usize, col as usize);
    (row < BOARD_SIZE && col < BOARD_SIZE).then_some(row * BOARD_SIZE + col)
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn pos_to_position(pos: usize) -> Position {
    Position::new((pos / BOARD_SIZE) as u8, (pos % BOARD_SIZE) as u8)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
