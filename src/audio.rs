//! Sound effect cues
//!
//! The engine does not play audio. `SfxQueue` listens to game events and
//! collects the cues a front end should play, in the order they happened.

use crate::event::{EventSink, GameEvent};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sfx {
    Move,
    Rotate,
    Hold,
    HardDrop,
    Clear,
}

impl Sfx {
    pub fn filename(&self) -> &'static str {
        match self {
            Sfx::Move => "move.mp3",
            Sfx::Rotate => "rotate.mp3",
            Sfx::Hold => "hold.mp3",
            Sfx::HardDrop => "hard-drop.mp3",
            Sfx::Clear => "clear.mp3",
        }
    }

    /// Location of the cue under an assets directory
    pub fn path_in(&self, assets: &Path) -> PathBuf {
        assets.join("se").join(self.filename())
    }

    /// The cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PieceMoved { .. } => Some(Sfx::Move),
            GameEvent::PieceRotated { .. } => Some(Sfx::Rotate),
            GameEvent::PieceHeld { .. } => Some(Sfx::Hold),
            GameEvent::HardDropped { .. } => Some(Sfx::HardDrop),
            GameEvent::LinesCleared { .. } => Some(Sfx::Clear),
            _ => None,
        }
    }
}

/// Pending cues waiting for a player to pick them up
#[derive(Debug, Clone, Default)]
pub struct SfxQueue {
    pending: Vec<Sfx>,
    played: u64,
}

impl SfxQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every cue queued since the last drain
    pub fn drain(&mut self) -> Vec<Sfx> {
        self.played += self.pending.len() as u64;
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Sfx] {
        &self.pending
    }

    /// Cues handed out by `drain` so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl EventSink for SfxQueue {
    fn emit(&mut self, event: &GameEvent) {
        if let Some(sfx) = Sfx::for_event(event) {
            self.pending.push(sfx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Shift;
    use crate::tetromino::{PieceKind, RotationDirection};

    #[test]
    fn test_queue_collects_in_order() {
        let mut queue = SfxQueue::new();
        queue.emit(&GameEvent::PieceMoved {
            direction: Shift::Left,
        });
        queue.emit(&GameEvent::PieceRotated {
            direction: RotationDirection::Clockwise,
            kick: 0,
        });
        queue.emit(&GameEvent::HardDropped { distance: 4 });
        queue.emit(&GameEvent::LinesCleared { rows: vec![22] });
        queue.emit(&GameEvent::PieceLocked {
            kind: PieceKind::T,
            lines: 1,
        });

        assert_eq!(
            queue.drain(),
            vec![Sfx::Move, Sfx::Rotate, Sfx::HardDrop, Sfx::Clear]
        );
        assert!(queue.pending().is_empty());
        assert_eq!(queue.played(), 4);
    }

    #[test]
    fn test_silent_events() {
        assert_eq!(Sfx::for_event(&GameEvent::Restarted), None);
        assert_eq!(
            Sfx::for_event(&GameEvent::GameOver {
                put_pieces: 3,
                cleared_lines: 0
            }),
            None
        );
    }

    #[test]
    fn test_asset_paths() {
        assert_eq!(
            Sfx::Hold.path_in(Path::new("assets")),
            Path::new("assets/se/hold.mp3")
        );
    }
}
