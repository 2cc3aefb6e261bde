//! Game room logic: a tic-tac-toe turn engine and a dice turn tracker.
//!
//! The tic-tac-toe board is a plain array of cells. The engine functions on
//! [`Board`] are not turn-aware; turn locking lives in [`session::Session`].
//!
//! # Board Encoding (32-bit)
//!
//! ```text
//! Bits 0-17:  Board state (9 cells × 2 bits per cell)
//! Bits 18-31: Unused (must be zero)
//!
//! Each cell (2 bits):
//!   0 = empty, 1 = Human, 2 = Opponent, 3 = invalid
//!
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod dice;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ConfigError, HostConfig};
pub use session::{Outcome, Phase, Played, Session};

/// Which party has claimed a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Owner {
    Human = 1,
    Opponent = 2,
}

impl Owner {
    /// Get the other party.
    #[inline]
    pub fn opponent(self) -> Owner {
        match self {
            Owner::Human => Owner::Opponent,
            Owner::Opponent => Owner::Human,
        }
    }

    /// Convert from u8 (1 or 2) to Owner.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Owner> {
        match bits {
            1 => Some(Owner::Human),
            2 => Some(Owner::Opponent),
            _ => None,
        }
    }
}

/// One of the nine board positions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Owner),
}

impl Cell {
    /// Owner of the cell, if any.
    #[inline]
    pub fn owner(self) -> Option<Owner> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(owner) => Some(owner),
        }
    }

    #[inline]
    fn to_bits(self) -> u32 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(owner) => owner as u32,
        }
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Validate a host-supplied index.
    pub fn new(index: usize) -> Result<Pos, MoveError> {
        if index < Board::CELLS {
            Ok(Pos(index as u8))
        } else {
            Err(MoveError::InvalidPosition { position: index })
        }
    }

    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a move was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Display)]
pub enum MoveError {
    /// Target cell already holds a mark.
    #[display("cell {position} is already occupied")]
    CellOccupied { position: Pos },
    /// Index outside 0-8.
    #[display("position {position} is outside the board (0-8)")]
    InvalidPosition { position: usize },
    /// Opponent asked to move on a full board.
    #[display("no free cells left to choose from")]
    NoFreeCells,
}

impl std::error::Error for MoveError {}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WIN_LINES: [[Pos; 3]; 8] = [
    [Pos(0), Pos(1), Pos(2)], // Row 0
    [Pos(3), Pos(4), Pos(5)], // Row 1
    [Pos(6), Pos(7), Pos(8)], // Row 2
    [Pos(0), Pos(3), Pos(6)], // Col 0
    [Pos(1), Pos(4), Pos(7)], // Col 1
    [Pos(2), Pos(5), Pos(8)], // Col 2
    [Pos(0), Pos(4), Pos(8)], // Main diagonal
    [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
];

/// Tic-tac-toe board state.
///
/// See module documentation for the compact encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Number of cells on the board.
    pub const CELLS: usize = 9;
    /// Bits per cell in the compact encoding.
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u32 = 0b11;
    /// Mask covering every cell in the compact encoding.
    const BOARD_MASK: u32 = (1 << (Self::CELLS as u32 * Self::CELL_BITS)) - 1;

    /// Create a new empty board.
    #[inline]
    pub fn new() -> Board {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Decode a board from its compact encoding.
    /// Returns None if any cell holds the invalid code 3 or unused bits are set.
    pub fn from_u32(bits: u32) -> Option<Board> {
        if bits & !Self::BOARD_MASK != 0 {
            return None;
        }
        let mut board = Board::new();
        for pos in Pos::all() {
            let code = (bits >> (pos.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK;
            board.cells[pos.index()] = match code {
                0 => Cell::Empty,
                _ => Cell::Occupied(Owner::from_bits(code as u8)?),
            };
        }
        Some(board)
    }

    /// Get the compact encoding.
    pub fn to_u32(&self) -> u32 {
        Pos::all().fold(0, |acc, pos| {
            acc | (self.cells[pos.index()].to_bits() << (pos.0 as u32 * Self::CELL_BITS))
        })
    }

    /// Get the cell at the given position.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.index()]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell(pos) == Cell::Empty
    }

    /// Positions that are still empty, in ascending order.
    pub fn free_cells(&self) -> Vec<Pos> {
        Pos::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    // ========== Move Application ==========

    /// Claim the cell at `position` for `owner`.
    ///
    /// Only the target cell changes. The board is left untouched when the
    /// position is out of range or already taken. Whose turn it is does not
    /// matter here; see [`session::Session`] for that.
    pub fn apply_move(&mut self, position: usize, owner: Owner) -> Result<Pos, MoveError> {
        let pos = Pos::new(position)?;
        if !self.is_empty(pos) {
            return Err(MoveError::CellOccupied { position: pos });
        }
        self.cells[pos.index()] = Cell::Occupied(owner);
        Ok(pos)
    }

    // ========== Win Detection ==========

    /// Get the first line held entirely by one owner, if any.
    pub fn winning_line(&self) -> Option<[Pos; 3]> {
        WIN_LINES.iter().copied().find(|&[a, b, c]| {
            let first = self.cell(a);
            first != Cell::Empty && first == self.cell(b) && first == self.cell(c)
        })
    }

    /// Check whether any line is complete.
    ///
    /// A full board without a line is not a win. Draws are not detected.
    #[inline]
    pub fn detect_win(&self) -> bool {
        self.winning_line().is_some()
    }

    /// Owner of the first complete line, if any.
    pub fn winner(&self) -> Option<Owner> {
        self.winning_line().and_then(|[a, _, _]| self.cell(a).owner())
    }

    // ========== Opponent Move Selection ==========

    /// Pick a free cell uniformly at random.
    ///
    /// Does not modify the board; apply the returned position with
    /// [`Board::apply_move`].
    pub fn select_opponent_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Pos, MoveError> {
        let free = self.free_cells();
        if free.is_empty() {
            return Err(MoveError::NoFreeCells);
        }
        Ok(free[rng.random_range(0..free.len())])
    }
}

impl fmt::Display for Board {
    /// Renders `X` for the human, `O` for the opponent and `.` for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3u8 {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..3u8 {
                let symbol = match self.cell(Pos::from_row_col(row, col)) {
                    Cell::Empty => '.',
                    Cell::Occupied(Owner::Human) => 'X',
                    Cell::Occupied(Owner::Opponent) => 'O',
                };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
