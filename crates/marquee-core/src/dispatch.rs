//! Input dispatch: keyboard events and polled gamepad state to actions.

use std::time::{Duration, Instant};

use crate::config::GamepadConfig;
use crate::input::{Button, GamepadState, InputEvent};

/// A navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Confirm,
    Exit,
    ToggleLanguage,
    /// Jump straight to an item (pointer click).
    Select(usize),
}

/// Keyboard mapping. Keyboard input is never debounced.
pub fn action_for_event(event: &InputEvent) -> Option<Action> {
    match event {
        InputEvent::ButtonPress(button) => match button {
            Button::Left => Some(Action::MoveLeft),
            Button::Right => Some(Action::MoveRight),
            Button::Confirm => Some(Action::Confirm),
            Button::Cancel => Some(Action::Exit),
            Button::Select => Some(Action::ToggleLanguage),
            Button::Up | Button::Down => None,
        },
        _ => None,
    }
}

/// Turns per-frame gamepad snapshots into actions.
///
/// All gamepad actions share one cooldown gate: a move closes it for the
/// move cooldown, a confirm for the longer confirm cooldown. At most one
/// move is produced per poll, the stick taking priority over the D-pad.
#[derive(Debug)]
pub struct GamepadPoller {
    threshold: f32,
    move_cooldown: Duration,
    confirm_cooldown: Duration,
    ready_at: Option<Instant>,
    connected: bool,
}

impl GamepadPoller {
    pub fn new(config: &GamepadConfig) -> Self {
        Self {
            threshold: config.axis_threshold,
            move_cooldown: config.move_cooldown(),
            confirm_cooldown: config.confirm_cooldown(),
            ready_at: None,
            connected: false,
        }
    }

    pub fn poll(&mut self, now: Instant, state: Option<&GamepadState>) -> Vec<Action> {
        let Some(pad) = state else {
            if self.connected {
                log::info!("Gamepad lost");
                self.connected = false;
            }
            return Vec::new();
        };
        if !self.connected {
            log::info!("Gamepad active");
            self.connected = true;
        }
        if self.ready_at.is_some_and(|at| now < at) {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let movement = if pad.axis_x > self.threshold {
            Some(Action::MoveRight)
        } else if pad.axis_x < -self.threshold {
            Some(Action::MoveLeft)
        } else if pad.dpad_right {
            Some(Action::MoveRight)
        } else if pad.dpad_left {
            Some(Action::MoveLeft)
        } else {
            None
        };
        if let Some(action) = movement {
            actions.push(action);
            self.ready_at = Some(now + self.move_cooldown);
        }
        if pad.primary {
            actions.push(Action::Confirm);
            self.ready_at = Some(now + self.confirm_cooldown);
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn poller() -> GamepadPoller {
        GamepadPoller::new(&GamepadConfig::default())
    }

    fn stick(x: f32) -> GamepadState {
        GamepadState {
            axis_x: x,
            ..GamepadState::default()
        }
    }

    #[test]
    fn keyboard_mapping() {
        let press = |b| action_for_event(&InputEvent::ButtonPress(b));
        assert_eq!(press(Button::Left), Some(Action::MoveLeft));
        assert_eq!(press(Button::Right), Some(Action::MoveRight));
        assert_eq!(press(Button::Confirm), Some(Action::Confirm));
        assert_eq!(press(Button::Cancel), Some(Action::Exit));
        assert_eq!(press(Button::Select), Some(Action::ToggleLanguage));
        assert_eq!(press(Button::Up), None);
        assert_eq!(action_for_event(&InputEvent::ButtonRelease(Button::Left)), None);
        assert_eq!(action_for_event(&InputEvent::Quit), None);
    }

    #[test]
    fn no_pad_is_quiet() {
        let mut p = poller();
        assert!(p.poll(Instant::now(), None).is_empty());
    }

    #[test]
    fn axis_beyond_threshold_moves() {
        let t0 = Instant::now();
        let mut p = poller();
        assert_eq!(p.poll(t0, Some(&stick(0.9))), vec![Action::MoveRight]);
        let mut p = poller();
        assert_eq!(p.poll(t0, Some(&stick(-0.9))), vec![Action::MoveLeft]);
        let mut p = poller();
        assert!(p.poll(t0, Some(&stick(0.5))).is_empty());
    }

    #[test]
    fn held_stick_moves_once_per_cooldown() {
        let t0 = Instant::now();
        let mut p = poller();
        let held = stick(1.0);
        let mut moves = 0;
        // 60 Hz for 300 ms
        for frame in 0..18u32 {
            moves += p.poll(t0 + frame * 16 * MS + MS, Some(&held)).len();
        }
        // Frames at 1, 161 ms; 321 ms is outside the window.
        assert_eq!(moves, 2);
    }

    #[test]
    fn stick_beats_dpad() {
        let mut p = poller();
        let pad = GamepadState {
            axis_x: -1.0,
            dpad_right: true,
            ..GamepadState::default()
        };
        assert_eq!(p.poll(Instant::now(), Some(&pad)), vec![Action::MoveLeft]);
    }

    #[test]
    fn dpad_moves() {
        let mut p = poller();
        let pad = GamepadState {
            dpad_left: true,
            ..GamepadState::default()
        };
        assert_eq!(p.poll(Instant::now(), Some(&pad)), vec![Action::MoveLeft]);
    }

    #[test]
    fn confirm_has_longer_cooldown() {
        let t0 = Instant::now();
        let mut p = poller();
        let press = GamepadState {
            primary: true,
            ..GamepadState::default()
        };
        assert_eq!(p.poll(t0, Some(&press)), vec![Action::Confirm]);
        assert!(p.poll(t0 + 200 * MS, Some(&press)).is_empty());
        assert!(p.poll(t0 + 200 * MS, Some(&stick(1.0))).is_empty());
        assert!(p.poll(t0 + 649 * MS, Some(&press)).is_empty());
        assert_eq!(p.poll(t0 + 650 * MS, Some(&press)), vec![Action::Confirm]);
    }
}
