//! Transient user-facing notifications produced by services.

use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// Maps a notice level to the alert style used by the front-end.
pub fn level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Success => "success",
        Level::Info => "info",
        Level::Error => "danger",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub message: String,
    /// Sticky notices stay until dismissed.
    pub sticky: bool,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            message: message.into(),
            sticky: true,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            title: title.into(),
            message: message.into(),
            sticky: true,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            message: message.into(),
            sticky: false,
        }
    }

    /// Turns a sticky notice into one that closes on its own.
    pub fn auto_close(mut self) -> Self {
        self.sticky = false;
        self
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", level_to_str(&self.level), self.title, self.message)
    }
}
