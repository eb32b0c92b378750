use std::ops::Add;

use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
pub const MASK_SIZE: usize = 4;

/// Pieces spawn two rows above the visible top so they slide into view.
pub const SPAWN_ANCHOR: Vec2i = Vec2i { x: 3, y: -2 };

pub const CELL_EMPTY: u8 = 0;
pub const CELL_FILLED: u8 = 1;

/// Row-major settled cells; row 0 is the top row.
pub type Board = [[u8; BOARD_WIDTH]; BOARD_HEIGHT];

/// 4x4 occupancy mask indexed `[row][col]`.
pub type Mask = [[u8; MASK_SIZE]; MASK_SIZE];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const LEFT: Vec2i = Vec2i { x: -1, y: 0 };
    pub const RIGHT: Vec2i = Vec2i { x: 1, y: 0 };
    pub const DOWN: Vec2i = Vec2i { x: 0, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2i {
    type Output = Vec2i;

    fn add(self, rhs: Vec2i) -> Self::Output {
        Vec2i::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Shape variants. Only the I bar is in play; the table is keyed by this enum so more
/// shapes only need a new variant and mask.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
}

impl Shape {
    pub const fn base_mask(self) -> Mask {
        match self {
            Shape::I => [
                [0, 0, 0, 0], //
                [1, 1, 1, 1], //
                [0, 0, 0, 0], //
                [0, 0, 0, 0], //
            ],
        }
    }
}

/// Quarter turn: `rotated[j][3 - i] = mask[i][j]`.
pub fn rotate_mask(mask: &Mask) -> Mask {
    let mut rotated = [[0u8; MASK_SIZE]; MASK_SIZE];
    for (i, row) in mask.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            rotated[j][MASK_SIZE - 1 - i] = cell;
        }
    }
    rotated
}

/// Board coordinates of the occupied cells of `mask` anchored at `pos`.
pub fn mask_cells(mask: &Mask, pos: Vec2i) -> impl Iterator<Item = (i32, i32)> + '_ {
    mask.iter().enumerate().flat_map(move |(i, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(move |(j, _)| (pos.x + j as i32, pos.y + i as i32))
    })
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub pos: Vec2i,
    pub mask: Mask,
}

impl ActivePiece {
    pub fn spawn(shape: Shape, pos: Vec2i) -> Self {
        Self {
            shape,
            pos,
            mask: shape.base_mask(),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        mask_cells(&self.mask, self.pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityAdvanceResult {
    Moved,
    /// The piece locked; `lines_cleared` rows were removed and a fresh piece spawned.
    Locked { lines_cleared: usize },
    /// The piece locked but the replacement collides at the spawn anchor.
    Halted { lines_cleared: usize },
    NoActivePiece,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetrisCore {
    board: Board,
    piece: ActivePiece,
    spawn_anchor: Vec2i,
    game_over: bool,
}

impl Default for TetrisCore {
    fn default() -> Self {
        Self::new()
    }
}

impl TetrisCore {
    /// Empty board with an I piece at the standard spawn anchor.
    pub fn new() -> Self {
        Self::with_spawn_anchor(SPAWN_ANCHOR)
    }

    pub fn with_spawn_anchor(spawn_anchor: Vec2i) -> Self {
        Self {
            board: [[CELL_EMPTY; BOARD_WIDTH]; BOARD_HEIGHT],
            piece: ActivePiece::spawn(Shape::I, spawn_anchor),
            spawn_anchor,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn current_piece_pos(&self) -> Vec2i {
        self.piece.pos
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn occupied_count(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|&&cell| cell != CELL_EMPTY)
            .count()
    }

    pub fn set_cell(&mut self, x: usize, y: usize, value: u8) {
        if y < BOARD_HEIGHT && x < BOARD_WIDTH {
            self.board[y][x] = if value == CELL_EMPTY {
                CELL_EMPTY
            } else {
                CELL_FILLED
            };
        }
    }

    /// Fills row `y`, leaving the columns in `gaps` empty.
    pub fn fill_row_except(&mut self, y: usize, gaps: &[usize]) {
        for x in 0..BOARD_WIDTH {
            let value = if gaps.contains(&x) {
                CELL_EMPTY
            } else {
                CELL_FILLED
            };
            self.set_cell(x, y, value);
        }
    }

    pub fn set_current_piece_for_test(&mut self, pos: Vec2i, mask: Mask) {
        self.piece.pos = pos;
        self.piece.mask = mask;
    }

    /// Whether `mask` may sit at `pos`: every occupied cell inside the side walls, above the
    /// floor, and on an empty board cell unless it is above the visible top.
    pub fn fits(&self, mask: &Mask, pos: Vec2i) -> bool {
        mask_cells(mask, pos).all(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return false;
            }
            y < 0 || self.board[y as usize][x as usize] == CELL_EMPTY
        })
    }

    /// Collision check for the current mask at a candidate anchor.
    pub fn can_move(&self, pos: Vec2i) -> bool {
        self.fits(&self.piece.mask, pos)
    }

    pub fn move_piece(&mut self, dir: Vec2i) -> bool {
        if self.game_over {
            return false;
        }
        let new_pos = self.piece.pos + dir;
        if !self.can_move(new_pos) {
            return false;
        }
        self.piece.pos = new_pos;
        true
    }

    pub fn move_piece_left(&mut self) -> bool {
        self.move_piece(Vec2i::LEFT)
    }

    pub fn move_piece_right(&mut self) -> bool {
        self.move_piece(Vec2i::RIGHT)
    }

    pub fn move_piece_down(&mut self) -> bool {
        self.move_piece(Vec2i::DOWN)
    }

    /// Rotates in place; rejected outright if the turned mask collides (no kicks).
    pub fn rotate_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let rotated = rotate_mask(&self.piece.mask);
        if !self.fits(&rotated, self.piece.pos) {
            return false;
        }
        self.piece.mask = rotated;
        true
    }

    /// Writes the piece into the board. Cells above the visible top are dropped.
    pub fn lock_piece(&mut self) {
        for (x, y) in mask_cells(&self.piece.mask, self.piece.pos) {
            if (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y) {
                self.board[y as usize][x as usize] = CELL_FILLED;
            }
        }
    }

    /// Removes full rows scanning bottom-up, re-checking an index after each removal.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.board[row].iter().all(|&cell| cell != CELL_EMPTY) {
                self.board.copy_within(0..row, 1);
                self.board[0] = [CELL_EMPTY; BOARD_WIDTH];
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Replaces the piece with a fresh I bar at the spawn anchor.
    ///
    /// Returns `false` and ends the game if it collides there.
    pub fn spawn_piece(&mut self) -> bool {
        self.piece = ActivePiece::spawn(Shape::I, self.spawn_anchor);
        if !self.can_move(self.piece.pos) {
            self.game_over = true;
            return false;
        }
        true
    }

    /// One gravity step: fall a row, or lock, clear and respawn.
    pub fn advance_with_gravity(&mut self) -> GravityAdvanceResult {
        if self.game_over {
            return GravityAdvanceResult::NoActivePiece;
        }
        if self.move_piece_down() {
            return GravityAdvanceResult::Moved;
        }

        self.lock_piece();
        let lines_cleared = self.clear_lines();
        if self.spawn_piece() {
            GravityAdvanceResult::Locked { lines_cleared }
        } else {
            GravityAdvanceResult::Halted { lines_cleared }
        }
    }
}
