//! Active falling piece
//!
//! A `Piece` is a plain value: every transform returns a new piece and leaves
//! the receiver untouched. Legality is decided by [`Board::is_collided`].
//!
//! [`Board::is_collided`]: crate::board::Board::is_collided

use crate::srs::get_wall_kicks;
use crate::tetromino::{PieceKind, Rotation, RotationDirection, Shape, shape_of};
use serde::Serialize;

/// Board row of a freshly spawned piece's matrix (top of the hidden margin)
pub const SPAWN_ROW: i32 = 0;
/// Board column of a freshly spawned piece's matrix
pub const SPAWN_COL: i32 = 4;

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    /// The type of tetromino
    pub kind: PieceKind,
    /// Current rotation state
    pub rotation: Rotation,
    /// Position (row, col) of the matrix's top-left corner
    /// Row 0 is the top of the board, increases downward
    pub row: i32,
    pub col: i32,
    /// Ticks since this piece spawned
    pub frames_alive: u32,
}

impl Piece {
    /// Create a new piece at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row: SPAWN_ROW,
            col: SPAWN_COL,
            frames_alive: 0,
        }
    }

    pub fn shape(&self) -> &'static Shape {
        shape_of(self.kind, self.rotation)
    }

    /// Get the absolute board positions of all 4 blocks
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape()
            .cells()
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
    }

    pub fn move_left(&self) -> Piece {
        Piece {
            col: self.col - 1,
            ..*self
        }
    }

    pub fn move_right(&self) -> Piece {
        Piece {
            col: self.col + 1,
            ..*self
        }
    }

    pub fn move_down(&self) -> Piece {
        Piece {
            row: self.row + 1,
            ..*self
        }
    }

    pub fn move_up(&self) -> Piece {
        Piece {
            row: self.row - 1,
            ..*self
        }
    }

    /// Candidate placements for a clockwise turn, in SRS kick priority order
    pub fn rotate_cw(&self) -> Vec<Piece> {
        self.rotation_candidates(RotationDirection::Clockwise)
    }

    /// Candidate placements for a counter-clockwise turn, in SRS kick priority order
    pub fn rotate_ccw(&self) -> Vec<Piece> {
        self.rotation_candidates(RotationDirection::CounterClockwise)
    }

    pub fn rotate(&self, direction: RotationDirection) -> Vec<Piece> {
        self.rotation_candidates(direction)
    }

    fn rotation_candidates(&self, direction: RotationDirection) -> Vec<Piece> {
        let rotation = self.rotation.turn(direction);
        get_wall_kicks(self.kind, self.rotation, direction)
            .iter()
            .map(|&(dr, dc)| Piece {
                rotation,
                row: self.row + dr,
                col: self.col + dc,
                ..*self
            })
            .collect()
    }
}
