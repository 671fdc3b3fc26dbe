//! Input handling with DAS (Delayed Auto Shift) and ARR (Auto Repeat Rate)
//!
//! The outer loop reports which keys are held on each tick; the `Controller`
//! counts how long each has been held and resolves that into the one-shot
//! command flags the simulation consumes. Everything is measured in ticks,
//! so a replay of held keys reproduces the same commands.

use crate::settings::ControlSettings;
use serde::{Deserialize, Serialize};

fn is_released(held: &bool) -> bool {
    !*held
}

/// Physical key state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeldKeys {
    #[serde(skip_serializing_if = "is_released")]
    pub left: bool,
    #[serde(skip_serializing_if = "is_released")]
    pub right: bool,
    #[serde(skip_serializing_if = "is_released")]
    pub soft_drop: bool,
    #[serde(skip_serializing_if = "is_released")]
    pub hard_drop: bool,
    #[serde(skip_serializing_if = "is_released")]
    pub rotate_cw: bool,
    #[serde(skip_serializing_if = "is_released")]
    pub rotate_ccw: bool,
    #[serde(skip_serializing_if = "is_released")]
    pub hold: bool,
    #[serde(skip_serializing_if = "is_released")]
    pub restart: bool,
}

/// Resolved commands for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    pub restart: bool,
    pub hold: bool,
    pub hard_drop: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub soft_drop: bool,
}

/// The single command the simulation acts on in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    Hold,
    HardDrop,
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    SoftDrop,
}

impl Input {
    /// Pick this tick's command by precedence:
    /// restart, hold, hard drop, left, right, clockwise, counter-clockwise, soft drop
    pub fn command(&self) -> Option<Command> {
        [
            (self.restart, Command::Restart),
            (self.hold, Command::Hold),
            (self.hard_drop, Command::HardDrop),
            (self.move_left, Command::MoveLeft),
            (self.move_right, Command::MoveRight),
            (self.rotate_cw, Command::RotateCw),
            (self.rotate_ccw, Command::RotateCcw),
            (self.soft_drop, Command::SoftDrop),
        ]
        .into_iter()
        .find_map(|(active, command)| active.then_some(command))
    }
}

/// Turns held-key durations into debounced commands
#[derive(Debug, Clone)]
pub struct Controller {
    left: u32,
    right: u32,
    soft_drop: u32,
    hard_drop: u32,
    rotate_cw: u32,
    rotate_ccw: u32,
    hold: u32,
    restart: u32,
    das: u32,
    arr: u32,
    restart_hold: u32,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&ControlSettings::default())
    }
}

/// Count consecutive held ticks, resetting on release
fn advance(duration: &mut u32, held: bool) -> u32 {
    *duration = if held { duration.saturating_add(1) } else { 0 };
    *duration
}

impl Controller {
    pub fn new(settings: &ControlSettings) -> Self {
        Self {
            left: 0,
            right: 0,
            soft_drop: 0,
            hard_drop: 0,
            rotate_cw: 0,
            rotate_ccw: 0,
            hold: 0,
            restart: 0,
            das: settings.das_frames,
            arr: settings.arr_frames.max(1),
            restart_hold: settings.restart_hold_frames.max(1),
        }
    }

    /// Feed this tick's key state and get this tick's commands
    pub fn update(&mut self, keys: &HeldKeys) -> Input {
        let left = advance(&mut self.left, keys.left);
        let right = advance(&mut self.right, keys.right);
        let soft_drop = advance(&mut self.soft_drop, keys.soft_drop);
        let hard_drop = advance(&mut self.hard_drop, keys.hard_drop);
        let rotate_cw = advance(&mut self.rotate_cw, keys.rotate_cw);
        let rotate_ccw = advance(&mut self.rotate_ccw, keys.rotate_ccw);
        let hold = advance(&mut self.hold, keys.hold);
        let restart = advance(&mut self.restart, keys.restart);

        Input {
            restart: restart == self.restart_hold,
            hold: hold == 1,
            hard_drop: hard_drop == 1,
            move_left: self.shifts(left),
            move_right: self.shifts(right),
            rotate_cw: rotate_cw == 1,
            rotate_ccw: rotate_ccw == 1,
            soft_drop: soft_drop > 0,
        }
    }

    /// Fires on press, then on the first tick past DAS and every ARR ticks after
    fn shifts(&self, duration: u32) -> bool {
        duration == 1 || (duration > self.das && (duration - self.das - 1) % self.arr == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_for(controller: &mut Controller, keys: HeldKeys, ticks: u32) -> Vec<Input> {
        (0..ticks).map(|_| controller.update(&keys)).collect()
    }

    #[test]
    fn test_edges_fire_once() {
        let mut controller = Controller::default();
        let keys = HeldKeys {
            hard_drop: true,
            rotate_cw: true,
            hold: true,
            ..Default::default()
        };
        let inputs = press_for(&mut controller, keys, 20);
        assert!(inputs[0].hard_drop && inputs[0].rotate_cw && inputs[0].hold);
        assert!(inputs[1..].iter().all(|i| !i.hard_drop && !i.rotate_cw && !i.hold));

        controller.update(&HeldKeys::default());
        assert!(controller.update(&keys).hard_drop);
    }

    #[test]
    fn test_das_then_arr() {
        let mut controller = Controller::default();
        let keys = HeldKeys {
            left: true,
            ..Default::default()
        };
        let fired: Vec<u32> = press_for(&mut controller, keys, 16)
            .iter()
            .zip(1..)
            .filter(|(input, _)| input.move_left)
            .map(|(_, tick)| tick)
            .collect();
        // press, then every 2 ticks starting right after the 9-tick delay
        assert_eq!(fired, vec![1, 10, 12, 14, 16]);
    }

    #[test]
    fn test_restart_needs_a_long_hold() {
        let mut controller = Controller::default();
        let keys = HeldKeys {
            restart: true,
            ..Default::default()
        };
        let inputs = press_for(&mut controller, keys, 60);
        let fired: Vec<_> = inputs.iter().enumerate().filter(|(_, i)| i.restart).collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, 29);

        let mut tapper = Controller::default();
        for _ in 0..10 {
            press_for(&mut tapper, keys, 5);
            tapper.update(&HeldKeys::default());
        }
        assert!(!press_for(&mut tapper, keys, 29).iter().any(|i| i.restart));
    }

    #[test]
    fn test_soft_drop_is_level_triggered() {
        let mut controller = Controller::default();
        let keys = HeldKeys {
            soft_drop: true,
            ..Default::default()
        };
        assert!(press_for(&mut controller, keys, 5).iter().all(|i| i.soft_drop));
        assert!(!controller.update(&HeldKeys::default()).soft_drop);
    }

    #[test]
    fn test_command_precedence() {
        let everything = Input {
            restart: true,
            hold: true,
            hard_drop: true,
            move_left: true,
            move_right: true,
            rotate_cw: true,
            rotate_ccw: true,
            soft_drop: true,
        };
        assert_eq!(everything.command(), Some(Command::Restart));

        let input = Input {
            hard_drop: true,
            move_left: true,
            ..Default::default()
        };
        assert_eq!(input.command(), Some(Command::HardDrop));

        let input = Input {
            move_right: true,
            rotate_ccw: true,
            soft_drop: true,
            ..Default::default()
        };
        assert_eq!(input.command(), Some(Command::MoveRight));

        let input = Input {
            rotate_cw: true,
            rotate_ccw: true,
            ..Default::default()
        };
        assert_eq!(input.command(), Some(Command::RotateCw));
        assert_eq!(Input::default().command(), None);
    }

    #[test]
    fn test_held_keys_serialize_compactly() {
        let keys = HeldKeys {
            right: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(json, r#"{"right":true}"#);
        let back: HeldKeys = serde_json::from_str(&json).unwrap();
        assert_eq!(back, keys);
        assert_eq!(serde_json::from_str::<HeldKeys>("{}").unwrap(), HeldKeys::default());
    }
}
