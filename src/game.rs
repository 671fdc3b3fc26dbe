//! Core game state and logic
//!
//! `Game::tick` advances the simulation by exactly one frame. Everything a
//! frame can do happens inside that call, in a fixed order, and is reported
//! to the caller's [`EventSink`] as it happens.

use crate::bag::Bag;
use crate::board::{Board, Cell};
use crate::error::GameError;
use crate::event::{EventSink, GameEvent, Shift};
use crate::fragment::Fragment;
use crate::input::{Command, Input};
use crate::lockdown::LockDown;
use crate::piece::Piece;
use crate::settings::GameplaySettings;
use crate::snapshot::Snapshot;
use crate::tetromino::{PieceKind, RotationDirection};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

/// Stream of the seed reserved for fragment jitter, apart from the bag's
const FRAGMENT_STREAM: u64 = 1;

/// The hold slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoldSlot {
    /// Held kind, if any
    pub kind: Option<PieceKind>,
    /// Cleared by a hold, restored when a piece locks
    pub available: bool,
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self {
            kind: None,
            available: true,
        }
    }
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    settings: GameplaySettings,
    board: Board,
    /// Current falling piece
    active: Piece,
    lock_down: LockDown,
    hold: HoldSlot,
    /// Piece bag randomizer
    bag: Bag,
    /// Upcoming kinds, refreshed whenever the bag is drawn from
    preview: Vec<PieceKind>,
    fragments: Vec<Fragment>,
    fragment_rng: ChaCha8Rng,
    frame_count: u64,
    put_pieces: u32,
    cleared_lines: u32,
    level: u32,
    drop_interval: u32,
}

impl Game {
    /// Create a new game seeded from OS entropy
    pub fn new(settings: GameplaySettings) -> Result<Self, GameError> {
        Self::with_seed(settings, rand::random())
    }

    /// Create a new game whose pieces and fragments follow `seed`
    pub fn with_seed(settings: GameplaySettings, seed: u64) -> Result<Self, GameError> {
        settings.validate()?;
        let mut bag = Bag::with_seed(seed);
        let preview = bag.sniff(settings.preview_len)?;
        let mut fragment_rng = ChaCha8Rng::seed_from_u64(seed);
        fragment_rng.set_stream(FRAGMENT_STREAM);

        let level = settings.level_for(0);
        let drop_interval = settings.drop_interval(level);
        let lock_down = LockDown::new(settings.backlash_frames, settings.max_manipulations);

        let mut game = Self {
            settings,
            board: Board::new(),
            active: Piece::new(PieceKind::I),
            lock_down,
            hold: HoldSlot::default(),
            bag,
            preview,
            fragments: Vec::new(),
            fragment_rng,
            frame_count: 0,
            put_pieces: 0,
            cleared_lines: 0,
            level,
            drop_interval,
        };
        let first = game.draw_next();
        game.spawn(first);
        debug!("New game (seed {}), first piece {}", seed, first.kind);
        Ok(game)
    }

    /// Advance the simulation by one frame
    pub fn tick<S: EventSink + ?Sized>(&mut self, input: &Input, events: &mut S) {
        self.frame_count += 1;
        self.active.frames_alive += 1;
        self.lock_down.update_timer();
        for fragment in &mut self.fragments {
            fragment.tick();
        }
        self.fragments.retain(Fragment::is_alive);

        self.level = self.settings.level_for(self.cleared_lines);
        let mut interval = self.settings.drop_interval(self.level);

        match input.command() {
            Some(Command::Restart) => {
                self.restart(events);
                return;
            }
            Some(Command::Hold) => {
                self.hold(events);
            }
            Some(Command::HardDrop) => {
                self.hard_drop(events);
                self.drop_interval = interval;
                return;
            }
            Some(Command::MoveLeft) => {
                self.shift(Shift::Left, events);
            }
            Some(Command::MoveRight) => {
                self.shift(Shift::Right, events);
            }
            Some(Command::RotateCw) => {
                self.rotate(RotationDirection::Clockwise, events);
            }
            Some(Command::RotateCcw) => {
                self.rotate(RotationDirection::CounterClockwise, events);
            }
            Some(Command::SoftDrop) => {
                interval = self.settings.soft_drop_interval(interval);
            }
            None => {}
        }
        self.drop_interval = interval;

        self.apply_gravity(events);
    }

    fn apply_gravity<S: EventSink + ?Sized>(&mut self, events: &mut S) {
        if self.lock_down.is_fixed() {
            self.lock_piece(events);
            return;
        }

        let frames = self.active.frames_alive;
        if frames == 0 || frames % self.drop_interval != 0 {
            return;
        }
        let next = self.active.move_down();
        if self.board.is_collided(&next) {
            self.lock_down.activate();
        } else {
            self.active = next;
            self.lock_down.reset();
        }
    }

    /// Commit a successful move or rotation
    fn manipulate(&mut self, next: Piece) {
        self.active = next;
        self.lock_down.update_counter();
    }

    fn shift<S: EventSink + ?Sized>(&mut self, direction: Shift, events: &mut S) -> bool {
        let next = match direction {
            Shift::Left => self.active.move_left(),
            Shift::Right => self.active.move_right(),
        };
        if self.board.is_collided(&next) {
            return false;
        }
        self.manipulate(next);
        events.emit(&GameEvent::PieceMoved { direction });
        true
    }

    /// Take the first kick candidate that fits
    fn rotate<S: EventSink + ?Sized>(
        &mut self,
        direction: RotationDirection,
        events: &mut S,
    ) -> bool {
        let Some((kick, next)) = self
            .active
            .rotate(direction)
            .into_iter()
            .enumerate()
            .find(|(_, candidate)| !self.board.is_collided(candidate))
        else {
            return false;
        };
        self.manipulate(next);
        events.emit(&GameEvent::PieceRotated { direction, kick });
        true
    }

    /// Swap the active piece with the hold slot, once per piece
    fn hold<S: EventSink + ?Sized>(&mut self, events: &mut S) -> bool {
        if !self.hold.available {
            return false;
        }

        let stashed = self.active.kind;
        let incoming = match self.hold.kind.replace(stashed) {
            Some(held) => Piece::new(held),
            None => self.draw_next(),
        };
        self.hold.available = false;
        self.spawn(incoming);
        debug!("Held {}, now playing {}", stashed, incoming.kind);
        events.emit(&GameEvent::PieceHeld {
            stashed,
            active: incoming.kind,
        });

        if self.is_game_over() {
            self.game_over(events);
        }
        true
    }

    fn hard_drop<S: EventSink + ?Sized>(&mut self, events: &mut S) {
        let landed = self.board.drop_position(&self.active);
        let distance = (landed.row - self.active.row) as u32;
        self.active = landed;
        events.emit(&GameEvent::HardDropped { distance });
        self.lock_piece(events);
    }

    /// Snap, fix, clear, then bring in the next piece
    fn lock_piece<S: EventSink + ?Sized>(&mut self, events: &mut S) {
        let piece = self.board.drop_position(&self.active);
        self.board.fix(&piece);

        let cleared = self.board.clear_lines();
        let lines = cleared.len() as u32;
        self.cleared_lines += lines;
        self.put_pieces += 1;

        for (&row, contents) in cleared.rows.iter().zip(&cleared.contents) {
            for (col, cell) in contents.iter().enumerate() {
                if let Cell::Filled(kind) = *cell {
                    self.fragments
                        .push(Fragment::spawn(kind, row, col, &mut self.fragment_rng));
                }
            }
        }

        debug!(
            "Locked {} at row {}, col {}; {} line(s) cleared",
            piece.kind, piece.row, piece.col, lines
        );
        if !cleared.is_empty() {
            events.emit(&GameEvent::LinesCleared { rows: cleared.rows });
        }
        events.emit(&GameEvent::PieceLocked {
            kind: piece.kind,
            lines,
        });

        let next = self.draw_next();
        self.spawn(next);
        self.hold.available = true;

        if self.is_game_over() {
            self.game_over(events);
        }
    }

    fn game_over<S: EventSink + ?Sized>(&mut self, events: &mut S) {
        info!(
            "Game over after {} pieces, {} lines",
            self.put_pieces, self.cleared_lines
        );
        events.emit(&GameEvent::GameOver {
            put_pieces: self.put_pieces,
            cleared_lines: self.cleared_lines,
        });
        self.restart(events);
    }

    /// Blow up the board and start over
    pub fn restart<S: EventSink + ?Sized>(&mut self, events: &mut S) {
        for (row, cells) in self.board.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Cell::Filled(kind) = *cell {
                    self.fragments
                        .push(Fragment::spawn(kind, row, col, &mut self.fragment_rng));
                }
            }
        }

        self.board = Board::new();
        self.bag.clear();
        self.hold = HoldSlot::default();
        self.frame_count = 0;
        self.put_pieces = 0;
        self.cleared_lines = 0;
        self.level = self.settings.level_for(0);
        self.drop_interval = self.settings.drop_interval(self.level);

        let first = self.draw_next();
        self.spawn(first);
        info!("Restarted with {}", first.kind);
        events.emit(&GameEvent::Restarted);
    }

    /// Take the next piece from the bag and refresh the preview
    fn draw_next(&mut self) -> Piece {
        let piece = self.bag.next();
        self.preview = self
            .bag
            .sniff(self.settings.preview_len)
            .expect("preview length is validated in with_seed");
        piece
    }

    /// Make `piece` the active piece with a fresh lock-down
    fn spawn(&mut self, piece: Piece) {
        self.active = piece;
        self.lock_down = LockDown::new(
            self.settings.backlash_frames,
            self.settings.max_manipulations,
        );
    }

    /// True while the active piece overlaps the stack
    pub fn is_game_over(&self) -> bool {
        self.board.is_collided(&self.active)
    }

    /// Where the active piece would land if hard dropped now
    pub fn ghost(&self) -> Piece {
        self.board.drop_position(&self.active)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    pub fn settings(&self) -> &GameplaySettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn lock_down(&self) -> &LockDown {
        &self.lock_down
    }

    pub fn hold_slot(&self) -> HoldSlot {
        self.hold
    }

    pub fn preview(&self) -> &[PieceKind] {
        &self.preview
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn put_pieces(&self) -> u32 {
        self.put_pieces
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval(&self) -> u32 {
        self.drop_interval
    }
}

#[cfg(test)]
impl Game {
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.spawn(piece);
        self.active.frames_alive = piece.frames_alive;
    }
}
