//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their four rotation states, laid out as
//! SRS occupancy matrices. Row 0 is the top row of a matrix, col 0 the left.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I, // long bar
    O, // square
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Get all tetromino types for bag randomization
    pub fn all() -> [PieceKind; 7] {
        [
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ]
    }

    /// Position in [`PieceKind::all`], used to index the constant tables
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = GameError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol.to_ascii_uppercase() {
            'I' => Ok(PieceKind::I),
            'O' => Ok(PieceKind::O),
            'T' => Ok(PieceKind::T),
            'S' => Ok(PieceKind::S),
            'Z' => Ok(PieceKind::Z),
            'J' => Ok(PieceKind::J),
            'L' => Ok(PieceKind::L),
            _ => Err(GameError::InvalidKind(symbol)),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn turn(&self, direction: RotationDirection) -> Rotation {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }

    /// Rotation state as 0..=3, 0 being the spawn orientation
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

impl TryFrom<u8> for Rotation {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Rotation::North),
            1 => Ok(Rotation::East),
            2 => Ok(Rotation::South),
            3 => Ok(Rotation::West),
            _ => Err(GameError::InvalidRotation(index)),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// An N×N occupancy matrix (N is 2, 3 or 4), padded into a 4×4 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    grid: [[u8; 4]; 4],
}

impl Shape {
    const fn square(rows: [[u8; 2]; 2]) -> Shape {
        let mut grid = [[0; 4]; 4];
        let mut r = 0;
        while r < 2 {
            let mut c = 0;
            while c < 2 {
                grid[r][c] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Shape { size: 2, grid }
    }

    const fn three(rows: [[u8; 3]; 3]) -> Shape {
        let mut grid = [[0; 4]; 4];
        let mut r = 0;
        while r < 3 {
            let mut c = 0;
            while c < 3 {
                grid[r][c] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Shape { size: 3, grid }
    }

    const fn four(grid: [[u8; 4]; 4]) -> Shape {
        Shape { size: 4, grid }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.grid[row][col] != 0
    }

    /// Occupied (row, col) offsets from the matrix's top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |r| {
            (0..self.size)
                .filter(move |&c| self.grid[r][c] != 0)
                .map(move |c| (r as i32, c as i32))
        })
    }

    /// The matrix turned 90 degrees clockwise about its center
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size;
        let mut grid = [[0; 4]; 4];
        for (r, row) in grid.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.grid[n - 1 - c][r];
            }
        }
        Shape { size: n, grid }
    }
}

/// Shape table indexed by [kind][rotation]
static SHAPES: [[Shape; 4]; 7] = [
    // I
    [
        Shape::four([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        Shape::four([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
        Shape::four([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
        Shape::four([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
    ],
    // O piece doesn't change under rotation
    [
        Shape::square([[1, 1], [1, 1]]),
        Shape::square([[1, 1], [1, 1]]),
        Shape::square([[1, 1], [1, 1]]),
        Shape::square([[1, 1], [1, 1]]),
    ],
    // T
    [
        Shape::three([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        Shape::three([[0, 1, 0], [0, 1, 1], [0, 1, 0]]),
        Shape::three([[0, 0, 0], [1, 1, 1], [0, 1, 0]]),
        Shape::three([[0, 1, 0], [1, 1, 0], [0, 1, 0]]),
    ],
    // S
    [
        Shape::three([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        Shape::three([[0, 1, 0], [0, 1, 1], [0, 0, 1]]),
        Shape::three([[0, 0, 0], [0, 1, 1], [1, 1, 0]]),
        Shape::three([[1, 0, 0], [1, 1, 0], [0, 1, 0]]),
    ],
    // Z
    [
        Shape::three([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        Shape::three([[0, 0, 1], [0, 1, 1], [0, 1, 0]]),
        Shape::three([[0, 0, 0], [1, 1, 0], [0, 1, 1]]),
        Shape::three([[0, 1, 0], [1, 1, 0], [1, 0, 0]]),
    ],
    // J
    [
        Shape::three([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        Shape::three([[0, 1, 1], [0, 1, 0], [0, 1, 0]]),
        Shape::three([[0, 0, 0], [1, 1, 1], [0, 0, 1]]),
        Shape::three([[0, 1, 0], [0, 1, 0], [1, 1, 0]]),
    ],
    // L
    [
        Shape::three([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        Shape::three([[0, 1, 0], [0, 1, 0], [0, 1, 1]]),
        Shape::three([[0, 0, 0], [1, 1, 1], [1, 0, 0]]),
        Shape::three([[1, 1, 0], [0, 1, 0], [0, 1, 0]]),
    ],
];

/// Look up the occupancy matrix for a kind in a rotation state
pub fn shape_of(kind: PieceKind, rotation: Rotation) -> &'static Shape {
    &SHAPES[kind.index()][rotation.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn test_rotate_matrix() {
        let l_east = shape_of(PieceKind::L, Rotation::East);
        let expected = Shape::three([[0, 0, 0], [1, 1, 1], [1, 0, 0]]);
        assert_eq!(l_east.rotated_cw(), expected);
    }

    #[test]
    fn test_table_is_closed_under_rotation() {
        for kind in PieceKind::all() {
            for rotation in ROTATIONS {
                assert_eq!(
                    shape_of(kind, rotation).rotated_cw(),
                    *shape_of(kind, rotation.cw()),
                    "{kind} {rotation:?}"
                );
            }
        }
    }

    #[test]
    fn test_four_turns_restore_matrix() {
        for kind in PieceKind::all() {
            let start = *shape_of(kind, Rotation::North);
            let turned = start.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(turned, start);
        }
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::all() {
            for rotation in ROTATIONS {
                assert_eq!(shape_of(kind, rotation).cells().count(), 4);
            }
        }
    }

    #[test]
    fn test_matrix_sizes() {
        assert_eq!(shape_of(PieceKind::I, Rotation::North).size(), 4);
        assert_eq!(shape_of(PieceKind::O, Rotation::North).size(), 2);
        assert_eq!(shape_of(PieceKind::T, Rotation::North).size(), 3);
    }

    #[test]
    fn test_rotation_cycle() {
        let mut rotation = Rotation::North;
        for _ in 0..4 {
            rotation = rotation.cw();
        }
        assert_eq!(rotation, Rotation::North);
        assert_eq!(Rotation::North.ccw().cw(), Rotation::North);
    }

    #[test]
    fn test_conversions_reject_unknown_values() {
        assert_eq!(PieceKind::try_from('t'), Ok(PieceKind::T));
        assert_eq!(PieceKind::try_from('X'), Err(GameError::InvalidKind('X')));
        assert_eq!(Rotation::try_from(2), Ok(Rotation::South));
        assert_eq!(Rotation::try_from(4), Err(GameError::InvalidRotation(4)));
    }
}
