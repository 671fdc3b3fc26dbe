//! Game board representation and collision detection
//!
//! The grid carries its own border: a wall column on each side of every row
//! and a floor row at the bottom. Those sentinel cells are stamped once and
//! never change, so collision is a single "is this cell empty" test.

use crate::piece::Piece;
use crate::tetromino::PieceKind;
use serde::Serialize;
use std::fmt;

/// Standard Tetris playfield dimensions
pub const VISIBLE_WIDTH: usize = 10;
pub const VISIBLE_HEIGHT: usize = 20;
/// Hidden rows above the visible playfield for spawning
pub const MARGIN: usize = 3;
/// Thickness of the wall/floor border
pub const SENTINEL: usize = 1;
pub const OUTER_WIDTH: usize = SENTINEL + VISIBLE_WIDTH + SENTINEL;
pub const OUTER_HEIGHT: usize = MARGIN + VISIBLE_HEIGHT + SENTINEL;
/// Index of the floor row
pub const FLOOR_ROW: usize = OUTER_HEIGHT - 1;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Permanent border cell
    Wall,
    /// Part of a locked piece
    Filled(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

pub type Row = [Cell; OUTER_WIDTH];

/// Rows removed by [`Board::clear_lines`], bottom-most first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedRows {
    /// Pre-clear row indices
    pub rows: Vec<usize>,
    /// Pre-clear contents of each cleared row, parallel to `rows`
    pub contents: Vec<Row>,
}

impl ClearedRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is top, row increases downward
    cells: [Row; OUTER_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board holding nothing but its walls and floor
    pub fn new() -> Self {
        let mut cells = [Self::empty_row(); OUTER_HEIGHT];
        cells[FLOOR_ROW] = [Cell::Wall; OUTER_WIDTH];
        Self { cells }
    }

    fn empty_row() -> Row {
        let mut row = [Cell::Empty; OUTER_WIDTH];
        row[0] = Cell::Wall;
        row[OUTER_WIDTH - 1] = Cell::Wall;
        row
    }

    fn is_sentinel(row: usize, col: usize) -> bool {
        row == FLOOR_ROW || col == 0 || col == OUTER_WIDTH - 1
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    /// Set a playable cell
    /// Returns false if out of bounds or on a sentinel
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= OUTER_HEIGHT || col >= OUTER_WIDTH || Self::is_sentinel(row, col) {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    pub fn rows(&self) -> &[Row; OUTER_HEIGHT] {
        &self.cells
    }

    /// True if any block of the piece leaves the grid or overlaps a non-empty cell
    pub fn is_collided(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|(row, col)| !matches!(self.get(row, col), Some(Cell::Empty)))
    }

    /// Burn a piece into the grid
    ///
    /// The piece must already be known not to collide at its position.
    pub fn fix(&mut self, piece: &Piece) {
        debug_assert!(!self.is_collided(piece), "fixing a colliding piece");
        for (row, col) in piece.cells() {
            self.set(row, col, Cell::Filled(piece.kind));
        }
    }

    /// Lowest legal placement of a piece straight below its current position
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut landed = *piece;
        loop {
            let next = landed.move_down();
            if self.is_collided(&next) {
                return landed;
            }
            landed = next;
        }
    }

    /// Remove filled rows and compact the rest downward in one pass
    ///
    /// Rows are scanned bottom to top; each surviving row is written once to
    /// its final position, so non-adjacent clears shift every row by exactly
    /// the number of cleared rows beneath it. Only visible rows can clear;
    /// margin rows are carried down like any other survivor.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::default();
        let mut write_row = FLOOR_ROW;

        for read_row in (0..FLOOR_ROW).rev() {
            if read_row >= MARGIN && Self::is_line_full(&self.cells[read_row]) {
                cleared.rows.push(read_row);
                cleared.contents.push(self.cells[read_row]);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        // Fill the top with fresh walled rows
        for row in 0..write_row {
            self.cells[row] = Self::empty_row();
        }

        cleared
    }

    /// Check if a line is completely filled, walls included
    fn is_line_full(row: &Row) -> bool {
        row.iter().all(|cell| !cell.is_empty())
    }

    /// Check if no locked block remains
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| !cell.is_filled()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells[MARGIN..] {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Wall => '#',
                    Cell::Filled(kind) => kind.symbol(),
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
