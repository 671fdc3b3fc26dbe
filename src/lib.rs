//! TETRS engine - a headless falling-block simulation
//!
//! The simulation advances one fixed tick per [`Game::tick`] call and never
//! touches a clock, a terminal or a speaker. Front ends feed it [`Input`]s,
//! listen through an [`EventSink`] and draw from a [`Snapshot`].

pub mod audio;
pub mod bag;
pub mod board;
pub mod error;
pub mod event;
pub mod fragment;
pub mod game;
pub mod input;
pub mod lockdown;
pub mod piece;
pub mod replay;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod srs;
pub mod tetromino;

pub use error::{GameError, SettingsError};
pub use event::{EventSink, GameEvent};
pub use game::Game;
pub use input::{Controller, HeldKeys, Input};
pub use settings::Settings;
pub use snapshot::Snapshot;
