//! Recorded sessions
//!
//! A replay is a seed plus the keys held on every tick. Feeding the frames
//! back through a fresh `Controller` and `Game` built from the same settings
//! reproduces the session exactly.

use crate::error::GameError;
use crate::event::EventSink;
use crate::game::Game;
use crate::input::{Controller, HeldKeys};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u64,
    pub frames: Vec<HeldKeys>,
}

impl Replay {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frames: Vec::new(),
        }
    }

    pub fn record(&mut self, keys: HeldKeys) {
        self.frames.push(keys);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(io::Error::from)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let contents = serde_json::to_string(self).map_err(io::Error::from)?;
        fs::write(path, contents)
    }

    /// Run every recorded frame through a new game and return it
    pub fn play<S: EventSink + ?Sized>(
        &self,
        settings: &Settings,
        events: &mut S,
    ) -> Result<Game, GameError> {
        let mut game = Game::with_seed(settings.gameplay.clone(), self.seed)?;
        let mut controller = Controller::new(&settings.controls);
        for keys in &self.frames {
            let input = controller.update(keys);
            game.tick(&input, events);
        }
        Ok(game)
    }
}
