use crate::{gesture::Gesture, keys::Key};
use std::fmt;

/// A maze game command.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
    None,
}

impl Action {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Fire => "FIRE",
            Self::None => "NONE",
        }
    }

    pub(crate) fn is_none(self) -> bool {
        self == Self::None
    }

    /// The key that performs this action in the game, if any.
    pub(crate) fn key(self) -> Option<Key> {
        match self {
            Self::Up => Some(Key::ArrowUp),
            Self::Down => Some(Key::ArrowDown),
            Self::Left => Some(Key::ArrowLeft),
            Self::Right => Some(Key::ArrowRight),
            Self::Fire => Some(Key::Space),
            Self::None => None,
        }
    }
}

impl From<Gesture> for Action {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::IndexUp => Self::Up,
            Gesture::MiddleUp => Self::Down,
            Gesture::Fist => Self::Left,
            Gesture::IndexMiddleUp => Self::Right,
            Gesture::Palm => Self::Fire,
            Gesture::None => Self::None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
