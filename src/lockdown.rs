//! Extended placement lock-down
//!
//! - A piece becomes grounded when a downward move fails; the timer and the
//!   manipulation counter start running.
//! - The timer advances every tick while grounded.
//! - A successful move or rotation while grounded resets the timer but bumps
//!   the counter, so manipulation buys time only up to a cap.
//! - The piece is fixed once the timer reaches the backlash frames or the
//!   counter reaches the manipulation cap, whichever happens first.

/// Ticks a grounded piece may rest before it locks
pub const DEFAULT_BACKLASH_FRAMES: u32 = 30;
/// Moves/rotations allowed while grounded before the piece locks regardless
pub const DEFAULT_MAX_MANIPULATIONS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockDown {
    grounded: bool,
    timer: u32,
    counter: u32,
    backlash_frames: u32,
    max_manipulations: u32,
}

impl Default for LockDown {
    fn default() -> Self {
        Self::new(DEFAULT_BACKLASH_FRAMES, DEFAULT_MAX_MANIPULATIONS)
    }
}

impl LockDown {
    pub fn new(backlash_frames: u32, max_manipulations: u32) -> Self {
        Self {
            grounded: false,
            timer: 0,
            counter: 0,
            backlash_frames,
            max_manipulations,
        }
    }

    /// Airborne → Grounded
    pub fn activate(&mut self) {
        self.grounded = true;
    }

    /// Back to Airborne after a successful downward move
    pub fn reset(&mut self) {
        self.grounded = false;
        self.timer = 0;
        self.counter = 0;
    }

    pub fn update_timer(&mut self) {
        if self.grounded {
            self.timer += 1;
        }
    }

    pub fn update_counter(&mut self) {
        if self.grounded {
            self.counter += 1;
            self.timer = 0;
        }
    }

    /// True once the piece must lock on this tick
    pub fn is_fixed(&self) -> bool {
        (self.grounded && self.timer >= self.backlash_frames)
            || self.counter >= self.max_manipulations
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn backlash_frames(&self) -> u32 {
        self.backlash_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airborne_never_fixes() {
        let mut lock = LockDown::default();
        for _ in 0..100 {
            lock.update_timer();
            lock.update_counter();
        }
        assert!(!lock.is_fixed());
        assert_eq!((lock.timer(), lock.counter()), (0, 0));
    }

    #[test]
    fn test_timer_fixes_at_backlash() {
        let mut lock = LockDown::default();
        lock.activate();
        for _ in 0..29 {
            lock.update_timer();
        }
        assert!(!lock.is_fixed());
        lock.update_timer();
        assert!(lock.is_fixed());
    }

    #[test]
    fn test_manipulation_cap() {
        let mut lock = LockDown::default();
        lock.activate();
        for i in 1..=15 {
            lock.update_timer();
            lock.update_counter();
            assert_eq!(lock.timer(), 0);
            assert_eq!(lock.is_fixed(), i == 15, "after {i} manipulations");
        }
    }

    #[test]
    fn test_manipulation_resets_timer() {
        let mut lock = LockDown::default();
        lock.activate();
        for _ in 0..29 {
            lock.update_timer();
        }
        lock.update_counter();
        for _ in 0..29 {
            lock.update_timer();
        }
        assert!(!lock.is_fixed());
    }

    #[test]
    fn test_reset_returns_to_airborne() {
        let mut lock = LockDown::new(5, 3);
        lock.activate();
        lock.update_counter();
        lock.update_timer();
        lock.reset();
        assert!(!lock.is_grounded());
        assert_eq!((lock.timer(), lock.counter()), (0, 0));
        assert!(!lock.is_fixed());
    }
}
