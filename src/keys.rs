use crate::error::Error;
use std::fmt;
use tracing::info;

/// The keys the maze game listens to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
}

impl Key {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::ArrowUp => "arrowup",
            Self::ArrowDown => "arrowdown",
            Self::ArrowLeft => "arrowleft",
            Self::ArrowRight => "arrowright",
            Self::Space => "space",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Somewhere to send simulated key presses.
pub(crate) trait KeySink {
    fn press(&mut self, key: Key) -> Result<(), Error>;
}

impl<S> KeySink for Box<S>
where
    S: KeySink + ?Sized,
{
    fn press(&mut self, key: Key) -> Result<(), Error> {
        (**self).press(key)
    }
}

/// Logs key presses without touching the OS.
#[derive(Debug, Default)]
pub(crate) struct LogSink;

impl KeySink for LogSink {
    fn press(&mut self, key: Key) -> Result<(), Error> {
        info!(key = key.name(), "dry run key press");
        Ok(())
    }
}

#[cfg(feature = "keyboard")]
pub(crate) use enigo_sink::EnigoSink;

#[cfg(feature = "keyboard")]
mod enigo_sink {
    use super::{Key, KeySink};
    use crate::error::Error;
    use enigo::{Direction, Enigo, Keyboard, Settings};

    /// Presses keys through the host OS input system.
    pub(crate) struct EnigoSink {
        enigo: Enigo,
    }

    impl EnigoSink {
        pub(crate) fn new() -> Result<Self, Error> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| Error::ConnectKeyboard(e.to_string()))?;
            Ok(Self { enigo })
        }
    }

    impl KeySink for EnigoSink {
        fn press(&mut self, key: Key) -> Result<(), Error> {
            let enigo_key = match key {
                Key::ArrowUp => enigo::Key::UpArrow,
                Key::ArrowDown => enigo::Key::DownArrow,
                Key::ArrowLeft => enigo::Key::LeftArrow,
                Key::ArrowRight => enigo::Key::RightArrow,
                Key::Space => enigo::Key::Space,
            };
            self.enigo
                .key(enigo_key, Direction::Click)
                .map_err(|e| Error::PressKey(key, e.to_string()))
        }
    }
}
