//! Read-only view of a game for renderers

use crate::board::Board;
use crate::game::{Game, HoldSlot};
use crate::piece::Piece;
use crate::tetromino::PieceKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivePiece {
    pub piece: Piece,
    /// Absolute (row, col) of each block
    pub cells: Vec<(i32, i32)>,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FragmentView {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub kind: PieceKind,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame_count: u64,
    pub put_pieces: u32,
    pub cleared_lines: u32,
    pub level: u32,
    pub drop_interval: u32,
    pub board: Board,
    pub active: ActivePiece,
    /// Row the active piece would land on
    pub ghost_row: i32,
    pub hold: HoldSlot,
    pub preview: Vec<PieceKind>,
    pub fragments: Vec<FragmentView>,
}

impl Snapshot {
    pub fn capture(game: &Game) -> Self {
        let active = *game.active();
        Self {
            frame_count: game.frame_count(),
            put_pieces: game.put_pieces(),
            cleared_lines: game.cleared_lines(),
            level: game.level(),
            drop_interval: game.drop_interval(),
            board: game.board().clone(),
            active: ActivePiece {
                piece: active,
                cells: active.cells().collect(),
                grounded: game.lock_down().is_grounded(),
            },
            ghost_row: game.ghost().row,
            hold: game.hold_slot(),
            preview: game.preview().to_vec(),
            fragments: game
                .fragments()
                .iter()
                .map(|fragment| {
                    let (x, y) = fragment.position();
                    FragmentView {
                        x,
                        y,
                        opacity: fragment.opacity(),
                        kind: fragment.kind,
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::GameEvent;
    use crate::input::Input;
    use crate::settings::GameplaySettings;

    #[test]
    fn test_snapshot_of_fresh_game() {
        let game = Game::with_seed(GameplaySettings::default(), 3).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.frame_count, 0);
        assert_eq!(snapshot.active.cells.len(), 4);
        assert!(!snapshot.active.grounded);
        assert_eq!(snapshot.preview, game.preview());
        assert!(snapshot.fragments.is_empty());
        // ghost lands on the floor of an empty board
        let ghost = game.ghost();
        assert_eq!(snapshot.ghost_row, ghost.row);
        assert_eq!(ghost.cells().map(|(row, _)| row).max(), Some(22));
    }

    #[test]
    fn test_snapshot_is_a_pure_read() {
        let mut game = Game::with_seed(GameplaySettings::default(), 3).unwrap();
        let input = Input {
            hard_drop: true,
            ..Default::default()
        };
        let mut events: Vec<GameEvent> = Vec::new();
        game.tick(&input, &mut events);
        assert_eq!(game.snapshot(), game.snapshot());
    }

    #[test]
    fn test_snapshot_serializes() {
        let game = Game::with_seed(GameplaySettings::default(), 11).unwrap();
        let value = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(value["board"]["cells"].as_array().map(Vec::len), Some(24));
        assert_eq!(value["hold"]["available"], true);
        assert_eq!(value["preview"].as_array().map(Vec::len), Some(6));
    }
}
