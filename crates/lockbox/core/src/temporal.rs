//! Clock-relative queries over a [`GameConfig`].
//!
//! All queries take the current time explicitly; reading the clock is the
//! caller's job.

use core::fmt;

use crate::state::{GameConfig, Timestamp};

/// A length of time broken into days, hours, minutes and seconds.
///
/// Unlike [`Timestamp`] this is relative: 90 seconds means "a minute and a
/// half from some other moment", not a point on the calendar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSpan {
    pub days: u32,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeSpan {
    pub const ZERO: Self = Self::from_secs(0);

    pub const fn from_secs(total: u32) -> Self {
        Self {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u8,
            minutes: ((total % 3_600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub const fn as_secs(&self) -> u32 {
        self.days * 86_400 + self.hours as u32 * 3_600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    pub const fn is_zero(&self) -> bool {
        self.as_secs() == 0
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Where the active checkpoint stands relative to the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CheckpointPhase {
    /// Game start not reached; nothing is revealed yet.
    AwaitingGameStart,
    /// Game running, the active checkpoint's window has not opened.
    AwaitingWindow,
    /// Inside `[window_open, window_close)`.
    WindowOpen,
    /// The window closed without the checkpoint being completed.
    WindowExpired,
}

impl GameConfig {
    pub fn is_game_start_reached(&self, now: Timestamp) -> bool {
        now >= self.game_start()
    }

    pub fn has_window_opened(&self, now: Timestamp) -> bool {
        now >= self.current_checkpoint().window_open()
    }

    /// Past the end of the active window.
    pub fn has_window_expired(&self, now: Timestamp) -> bool {
        self.has_window_opened(now) && !self.current_checkpoint().is_open_at(now)
    }

    pub fn time_until_game_start(&self, now: Timestamp) -> TimeSpan {
        TimeSpan::from_secs(now.secs_until(self.game_start()))
    }

    pub fn time_until_window_opens(&self, now: Timestamp) -> TimeSpan {
        TimeSpan::from_secs(now.secs_until(self.current_checkpoint().window_open()))
    }

    pub fn time_until_window_close(&self, now: Timestamp) -> TimeSpan {
        TimeSpan::from_secs(now.secs_until(self.current_checkpoint().window_close()))
    }

    pub fn phase(&self, now: Timestamp) -> CheckpointPhase {
        if !self.is_game_start_reached(now) {
            CheckpointPhase::AwaitingGameStart
        } else if !self.has_window_opened(now) {
            CheckpointPhase::AwaitingWindow
        } else if self.has_window_expired(now) {
            CheckpointPhase::WindowExpired
        } else {
            CheckpointPhase::WindowOpen
        }
    }
}
