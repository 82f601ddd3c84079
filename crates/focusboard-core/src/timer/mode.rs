//! Countdown modes and clock formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three fixed countdown configurations.
///
/// Serialized with the same keys the page uses for its mode buttons
/// (`mode-pomodoro`, `mode-short`, `mode-long`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "pomodoro")]
    Focus,
    #[serde(rename = "short")]
    ShortBreak,
    #[serde(rename = "long")]
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Full countdown length in seconds.
    pub const fn duration_secs(self) -> u32 {
        match self {
            Mode::Focus => 25 * 60,
            Mode::ShortBreak => 5 * 60,
            Mode::LongBreak => 15 * 60,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Mode::Focus => "pomodoro",
            Mode::ShortBreak => "short",
            Mode::LongBreak => "long",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Id of the mode's selector button in the page.
    pub fn button_id(self) -> String {
        format!("mode-{}", self.key())
    }

    /// Inverse of [`Mode::button_id`].
    pub fn from_button_id(id: &str) -> Option<Self> {
        id.strip_prefix("mode-").and_then(|key| key.parse().ok())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pomodoro" | "focus" => Ok(Mode::Focus),
            "short" | "short_break" | "short-break" => Ok(Mode::ShortBreak),
            "long" | "long_break" | "long-break" => Ok(Mode::LongBreak),
            other => Err(format!("unknown mode '{other}' (expected pomodoro, short or long)")),
        }
    }
}

/// Render seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped at 60, so `3600` renders as `60:00`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
