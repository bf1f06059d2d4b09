//! Platform-agnostic input event types.
//!
//! Every backend maps its native input to these enums. The launcher core
//! never sees raw platform input.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard / remote button pressed.
    ButtonPress(Button),
    /// A keyboard / remote button released.
    ButtonRelease(Button),
    /// Pointer click at absolute position (mouse or touch).
    PointerClick { x: i32, y: i32 },
    /// A game controller was plugged in.
    GamepadConnected,
    /// The game controller was unplugged.
    GamepadDisconnected,
    /// User requested quit (window close, etc.).
    Quit,
}

/// Buttons that map across all platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Select,
}

/// Snapshot of the first connected game controller, sampled once per
/// display refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadState {
    /// Left stick horizontal axis, normalized to `[-1.0, 1.0]` (negative = left).
    pub axis_x: f32,
    /// D-pad left held.
    pub dpad_left: bool,
    /// D-pad right held.
    pub dpad_right: bool,
    /// Primary face button (A / cross) held.
    pub primary: bool,
}

impl GamepadState {
    /// Normalize a raw signed 16-bit axis reading.
    pub fn normalize_axis(raw: i16) -> f32 {
        if raw < 0 {
            raw as f32 / 32768.0
        } else {
            raw as f32 / 32767.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_press_differs_from_release() {
        let press = InputEvent::ButtonPress(Button::Confirm);
        let release = InputEvent::ButtonRelease(Button::Confirm);
        assert_ne!(press, release);
    }

    #[test]
    fn pointer_click_event() {
        let e = InputEvent::PointerClick { x: 240, y: 136 };
        if let InputEvent::PointerClick { x, y } = e {
            assert_eq!(x, 240);
            assert_eq!(y, 136);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn button_hash_distinct() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Button::Left);
        set.insert(Button::Right);
        set.insert(Button::Left);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn gamepad_default_is_idle() {
        let pad = GamepadState::default();
        assert_eq!(pad.axis_x, 0.0);
        assert!(!pad.dpad_left && !pad.dpad_right && !pad.primary);
    }

    #[test]
    fn normalize_axis_extremes() {
        assert_eq!(GamepadState::normalize_axis(i16::MIN), -1.0);
        assert_eq!(GamepadState::normalize_axis(i16::MAX), 1.0);
        assert_eq!(GamepadState::normalize_axis(0), 0.0);
    }

    #[test]
    fn normalize_axis_half() {
        let v = GamepadState::normalize_axis(16384);
        assert!((v - 0.5).abs() < 0.001);
    }
}
