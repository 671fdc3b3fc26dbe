//! Cosmetic block fragments thrown off by cleared rows
//!
//! Each fragment follows `p(t) = p0 + v*t + a*t²/2` in board-cell units, with
//! `t` the ticks elapsed since spawn. The simulation only counts frames down;
//! what a fragment looks like is up to the renderer.

use crate::tetromino::PieceKind;
use rand::Rng;
use serde::Serialize;

/// Ticks a fragment stays alive
pub const FRAGMENT_LIFETIME: u32 = 30;
/// Horizontal launch speed is drawn from `-MAX..MAX` cells per tick
const MAX_HORIZONTAL_SPEED: f32 = 0.12;
const LAUNCH_SPEED: f32 = -0.12;
const GRAVITY: f32 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fragment {
    pub origin_row: usize,
    pub origin_col: usize,
    /// (x, y) cells per tick, y+ is down
    pub velocity: (f32, f32),
    /// (x, y) cells per tick²
    pub acceleration: (f32, f32),
    pub kind: PieceKind,
    pub frames_remaining: u32,
}

impl Fragment {
    /// Launch a fragment from a board cell with a jittered sideways speed
    pub fn spawn<R: Rng + ?Sized>(kind: PieceKind, row: usize, col: usize, rng: &mut R) -> Self {
        Self {
            origin_row: row,
            origin_col: col,
            velocity: (
                rng.gen_range(-MAX_HORIZONTAL_SPEED..MAX_HORIZONTAL_SPEED),
                LAUNCH_SPEED,
            ),
            acceleration: (0.0, GRAVITY),
            kind,
            frames_remaining: FRAGMENT_LIFETIME,
        }
    }

    fn elapsed(&self) -> f32 {
        FRAGMENT_LIFETIME.saturating_sub(self.frames_remaining) as f32
    }

    /// Center of the fragment as (x, y) in board-cell units
    pub fn position(&self) -> (f32, f32) {
        let t = self.elapsed();
        let x = travel(self.velocity.0, self.acceleration.0, t) + self.origin_col as f32 + 0.5;
        let y = travel(self.velocity.1, self.acceleration.1, t) + self.origin_row as f32 + 0.5;
        (x, y)
    }

    /// Remaining life as a fraction in 0.0..=1.0
    pub fn opacity(&self) -> f32 {
        self.frames_remaining as f32 / FRAGMENT_LIFETIME as f32
    }

    pub fn is_alive(&self) -> bool {
        self.frames_remaining > 0
    }

    pub fn tick(&mut self) {
        self.frames_remaining = self.frames_remaining.saturating_sub(1);
    }
}

fn travel(v: f32, a: f32, t: f32) -> f32 {
    v * t + 0.5 * a * t * t
}
