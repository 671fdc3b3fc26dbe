//! Scoring system following modern Tetris guidelines
//!
//! `Score` is an [`EventSink`]: it watches the simulation's events and keeps
//! its own tally, so the engine never needs to know points exist.

use crate::event::{EventSink, GameEvent};
use serde::Serialize;

/// Scoring calculation
#[derive(Debug, Clone, Serialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Current combo count (-1 = no combo)
    pub combo: i32,
    /// Whether the last clear was a tetris
    pub back_to_back: bool,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            combo: -1,
            back_to_back: false,
        }
    }

    /// Add score for a clear of `lines` rows and return the action name
    pub fn add_clear(&mut self, lines: u32) -> String {
        let (base_score, is_difficult, action_name) = match lines {
            1 => (100, false, "Single"),
            2 => (300, false, "Double"),
            3 => (500, false, "Triple"),
            4 => (800, true, "Tetris"),
            _ => return String::new(),
        };

        self.lines += lines;
        self.level = (self.lines / 10) + 1;

        let mut score = base_score * self.level as u64;

        // 1.5x for consecutive tetrises
        let chained = is_difficult && self.back_to_back;
        if chained {
            score = score * 3 / 2;
        }
        self.back_to_back = is_difficult;

        self.combo += 1;
        if self.combo > 0 {
            score += 50 * self.combo as u64 * self.level as u64;
        }

        self.points += score;

        let mut action = String::from(action_name);
        if self.combo > 0 {
            action.push_str(&format!(" Combo x{}", self.combo));
        }
        if chained {
            action = format!("B2B {}", action);
        }
        action
    }

    /// Add score for hard drop (2 points per cell)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * 2;
    }

    /// Reset combo (called when piece locks without clearing lines)
    pub fn reset_combo(&mut self) {
        self.combo = -1;
    }
}

impl EventSink for Score {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HardDropped { distance } => self.add_hard_drop(*distance),
            GameEvent::LinesCleared { rows } => {
                let action = self.add_clear(rows.len() as u32);
                tracing::debug!("{} -> {} points", action, self.points);
            }
            GameEvent::PieceLocked { lines: 0, .. } => self.reset_combo(),
            GameEvent::Restarted => *self = Self::new(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::PieceKind;

    fn clear(score: &mut Score, lines: usize) {
        score.emit(&GameEvent::LinesCleared {
            rows: (0..lines).map(|i| 22 - i).collect(),
        });
        score.emit(&GameEvent::PieceLocked {
            kind: PieceKind::I,
            lines: lines as u32,
        });
    }

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), "Single");
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_tetris() {
        let mut score = Score::new();
        score.add_clear(4);
        assert_eq!(score.points, 800);
        assert_eq!(score.lines, 4);
    }

    #[test]
    fn test_back_to_back() {
        let mut score = Score::new();
        score.add_clear(4);
        assert_eq!(score.points, 800);
        // 1.5x for the chain, plus a combo bonus of 50
        assert_eq!(score.add_clear(4), "B2B Tetris Combo x1");
        assert_eq!(score.points, 800 + 1200 + 50);
    }

    #[test]
    fn test_combo_breaks_on_empty_lock() {
        let mut score = Score::new();
        clear(&mut score, 1);
        clear(&mut score, 1);
        assert_eq!(score.points, 100 + 100 + 50);
        assert_eq!(score.combo, 1);

        score.emit(&GameEvent::PieceLocked {
            kind: PieceKind::O,
            lines: 0,
        });
        assert_eq!(score.combo, -1);
        clear(&mut score, 1);
        assert_eq!(score.points, 250 + 100);
    }

    #[test]
    fn test_level_up() {
        let mut score = Score::new();
        for _ in 0..10 {
            clear(&mut score, 1);
            score.reset_combo();
        }
        assert_eq!(score.level, 2);
        clear(&mut score, 2);
        // the tenth line is already scored at level 2
        assert_eq!(score.points, 900 + 200 + 600);
    }

    #[test]
    fn test_hard_drop_and_restart() {
        let mut score = Score::new();
        score.emit(&GameEvent::HardDropped { distance: 18 });
        assert_eq!(score.points, 36);
        score.emit(&GameEvent::Restarted);
        assert_eq!(score.points, 0);
        assert_eq!(score.level, 1);
    }
}
