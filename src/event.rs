//! Observable outcomes of a simulation tick
//!
//! Events are handed to an [`EventSink`] synchronously, once per occurrence,
//! while the tick that produced them is still running. Sinks observe; they
//! have no path back into the simulation.

use crate::tetromino::{PieceKind, RotationDirection};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shift {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    PieceMoved {
        direction: Shift,
    },
    PieceRotated {
        direction: RotationDirection,
        /// Index into the kick list that fit, 0 for the basic rotation
        kick: usize,
    },
    PieceHeld {
        stashed: PieceKind,
        active: PieceKind,
    },
    HardDropped {
        distance: u32,
    },
    /// Bottom-most row first, as pre-clear indices
    LinesCleared {
        rows: Vec<usize>,
    },
    PieceLocked {
        kind: PieceKind,
        lines: u32,
    },
    GameOver {
        put_pieces: u32,
        cleared_lines: u32,
    },
    Restarted,
}

/// Receiver for [`GameEvent`]s
pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

/// Discards every event
impl EventSink for () {
    fn emit(&mut self, _event: &GameEvent) {}
}

/// Records every event in order
impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Fans every event out to both sinks, left first
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &GameEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &GameEvent) {
        (**self).emit(event);
    }
}
