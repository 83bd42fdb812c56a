use crate::state::{ConfigError, Location, Timestamp};

/// One GPS/time-gated unlock stage.
///
/// The window is the half-open interval `[window_open, window_close)`.
/// `window_close >= window_open` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CheckpointRecord"))]
pub struct Checkpoint {
    location: Location,
    window_open: Timestamp,
    window_close: Timestamp,
}

impl Checkpoint {
    /// Checkpoint whose window stays open for `grace_secs` after `window_open`.
    pub const fn new(location: Location, window_open: Timestamp, grace_secs: u32) -> Self {
        Self {
            location,
            window_open,
            window_close: window_open.saturating_add(grace_secs),
        }
    }

    /// Checkpoint from explicit window bounds.
    pub fn with_window(
        location: Location,
        window_open: Timestamp,
        window_close: Timestamp,
    ) -> Result<Self, ConfigError> {
        if window_close < window_open {
            return Err(ConfigError::WindowInverted {
                open: window_open,
                close: window_close,
            });
        }
        Ok(Self {
            location,
            window_open,
            window_close,
        })
    }

    pub const fn location(&self) -> Location {
        self.location
    }

    pub const fn window_open(&self) -> Timestamp {
        self.window_open
    }

    pub const fn window_close(&self) -> Timestamp {
        self.window_close
    }

    /// Length of the window in seconds.
    pub const fn grace_secs(&self) -> u32 {
        self.window_open.secs_until(self.window_close)
    }

    /// Whether `now` falls inside `[window_open, window_close)`.
    pub fn is_open_at(&self, now: Timestamp) -> bool {
        self.window_open <= now && now < self.window_close
    }

    /// Push the window back by `secs`. The opening moves only when
    /// `include_open` is set; the close always moves, so the window never
    /// inverts.
    pub(crate) fn shift(&mut self, secs: u32, include_open: bool) {
        if include_open {
            self.window_open = self.window_open.saturating_add(secs);
        }
        self.window_close = self.window_close.saturating_add(secs);
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CheckpointRecord {
    location: Location,
    window_open: Timestamp,
    window_close: Timestamp,
}

#[cfg(feature = "serde")]
impl TryFrom<CheckpointRecord> for Checkpoint {
    type Error = ConfigError;

    fn try_from(record: CheckpointRecord) -> Result<Self, Self::Error> {
        Self::with_window(record.location, record.window_open, record.window_close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Location = Location::new(121_234_567, -109_876_543);

    #[test]
    fn grace_defines_window_close() {
        let checkpoint = Checkpoint::new(HERE, Timestamp(1_000), 900);
        assert_eq!(checkpoint.window_close(), Timestamp(1_900));
        assert_eq!(checkpoint.grace_secs(), 900);
    }

    #[test]
    fn window_is_half_open() {
        let checkpoint = Checkpoint::new(HERE, Timestamp(1_000), 60);
        assert!(!checkpoint.is_open_at(Timestamp(999)));
        assert!(checkpoint.is_open_at(Timestamp(1_000)));
        assert!(checkpoint.is_open_at(Timestamp(1_059)));
        assert!(!checkpoint.is_open_at(Timestamp(1_060)));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = Checkpoint::with_window(HERE, Timestamp(10), Timestamp(9)).unwrap_err();
        assert!(matches!(err, ConfigError::WindowInverted { .. }));
    }

    #[test]
    fn shift_without_open_widens_window() {
        let mut checkpoint = Checkpoint::new(HERE, Timestamp(1_000), 60);
        checkpoint.shift(300, false);
        assert_eq!(checkpoint.window_open(), Timestamp(1_000));
        assert_eq!(checkpoint.window_close(), Timestamp(1_360));

        checkpoint.shift(100, true);
        assert_eq!(checkpoint.window_open(), Timestamp(1_100));
        assert_eq!(checkpoint.window_close(), Timestamp(1_460));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_rejects_inverted_window() {
        let inverted = r#"{"location":{"latitude":0,"longitude":0},"window_open":20,"window_close":10}"#;
        let err = serde_json::from_str::<Checkpoint>(inverted).unwrap_err();
        assert!(err.to_string().contains("before it opens"), "{err}");

        let checkpoint = Checkpoint::new(HERE, Timestamp(1_000), 60);
        let json = serde_json::to_string(&checkpoint).unwrap();
        assert_eq!(serde_json::from_str::<Checkpoint>(&json).unwrap(), checkpoint);
    }
}
