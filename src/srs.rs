//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.
//! Offsets are (row, col) in board coordinates: row+ is down, col+ is right.

use crate::tetromino::{PieceKind, Rotation, RotationDirection};

static IDENTITY: [(i32, i32); 1] = [(0, 0)];

/// Get wall kick offsets for a rotation attempt, in priority order
///
/// JLSTZ and I yield five offsets with the identity first; O yields only the
/// identity since it rotates in place.
pub fn get_wall_kicks(
    piece_type: PieceKind,
    from: Rotation,
    direction: RotationDirection,
) -> &'static [(i32, i32)] {
    match piece_type {
        PieceKind::O => IDENTITY.as_slice(),
        PieceKind::I => i_piece_kicks(from, direction).as_slice(),
        _ => jlstz_kicks(from, direction).as_slice(),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
fn jlstz_kicks(from: Rotation, direction: RotationDirection) -> &'static [(i32, i32); 5] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R, 2→R
        (North, Clockwise) | (South, CounterClockwise) => {
            &[(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)]
        }
        // R→0, R→2
        (East, CounterClockwise) | (East, Clockwise) => {
            &[(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)]
        }
        // 2→L, 0→L
        (South, Clockwise) | (North, CounterClockwise) => {
            &[(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)]
        }
        // L→2, L→0
        (West, CounterClockwise) | (West, Clockwise) => {
            &[(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)]
        }
    }
}

/// Wall kicks for I piece (different from other pieces)
fn i_piece_kicks(from: Rotation, direction: RotationDirection) -> &'static [(i32, i32); 5] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => &[(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // R→0
        (East, CounterClockwise) => &[(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // R→2
        (East, Clockwise) => &[(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
        // 2→R
        (South, CounterClockwise) => &[(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 2→L
        (South, Clockwise) => &[(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // L→2
        (West, CounterClockwise) => &[(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // L→0
        (West, Clockwise) => &[(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 0→L
        (North, CounterClockwise) => &[(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    }
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
    const DIRECTIONS: [RotationDirection; 2] = [
        RotationDirection::Clockwise,
        RotationDirection::CounterClockwise,
    ];

    #[test]
    fn test_kick_count() {
        for piece in PieceKind::all() {
            for from in ROTATIONS {
                for dir in DIRECTIONS {
                    let kicks = get_wall_kicks(piece, from, dir);
                    let expected = if piece == PieceKind::O { 1 } else { 5 };
                    assert_eq!(kicks.len(), expected);
                }
            }
        }
    }

    #[test]
    fn test_first_kick_is_identity() {
        for piece in PieceKind::all() {
            for from in ROTATIONS {
                for dir in DIRECTIONS {
                    let kicks = get_wall_kicks(piece, from, dir);
                    assert_eq!(kicks[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_reverse_rotation_negates_kicks() {
        // Kicks for A→B are the negation of kicks for B→A
        for piece in [PieceKind::T, PieceKind::I] {
            for from in ROTATIONS {
                let forward = get_wall_kicks(piece, from, RotationDirection::Clockwise);
                let back = get_wall_kicks(piece, from.cw(), RotationDirection::CounterClockwise);
                for (a, b) in forward.iter().zip(back) {
                    assert_eq!((a.0, a.1), (-b.0, -b.1), "{piece} from {from:?}");
                }
            }
        }
    }
}
