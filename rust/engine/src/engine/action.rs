// rust/engine/src/engine/action.rs
#![forbid(unsafe_code)]

use serde::Serialize;

pub const ACTION_DIM: usize = 6;

/// One Game Boy button. Indices follow the controller's button order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Action {
    Down,
    Left,
    Right,
    Up,
    /// Jump.
    A,
    /// Run / fireball.
    B,
}

impl Action {
    pub const ALL: [Action; ACTION_DIM] = [
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Up,
        Action::A,
        Action::B,
    ];

    #[inline]
    pub fn idx(self) -> usize {
        match self {
            Action::Down => 0,
            Action::Left => 1,
            Action::Right => 2,
            Action::Up => 3,
            Action::A => 4,
            Action::B => 5,
        }
    }

    #[inline]
    pub fn from_idx(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "down" => Some(Action::Down),
            "left" => Some(Action::Left),
            "right" => Some(Action::Right),
            "up" => Some(Action::Up),
            "a" | "jump" => Some(Action::A),
            "b" | "run" => Some(Action::B),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::Up => "UP",
            Action::A => "A",
            Action::B => "B",
        }
    }

    #[inline]
    pub fn press(self) -> Signal {
        Signal::Press(self)
    }

    #[inline]
    pub fn release(self) -> Signal {
        Signal::Release(self)
    }
}

/// Input event sent to the emulator. Every press has exactly one matching release.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Signal {
    Press(Action),
    Release(Action),
}

impl Signal {
    pub fn action(self) -> Action {
        match self {
            Signal::Press(a) | Signal::Release(a) => a,
        }
    }

    pub fn is_press(self) -> bool {
        matches!(self, Signal::Press(_))
    }

    /**
     * Emulator window-event code for this signal.
     *
     * PyBoy numbering: 1..=6 press UP, DOWN, RIGHT, LEFT, A, B and 9..=14 release them in the
     * same order. Note the arrow order differs from `Action::idx`.
     */
    pub fn code(self) -> u8 {
        let base = match self.action() {
            Action::Up => 1,
            Action::Down => 2,
            Action::Right => 3,
            Action::Left => 4,
            Action::A => 5,
            Action::B => 6,
        };
        match self {
            Signal::Press(_) => base,
            Signal::Release(_) => base + 8,
        }
    }
}
