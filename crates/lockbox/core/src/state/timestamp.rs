use core::fmt;

/// Absolute UTC time in seconds since the Unix epoch.
///
/// 32-bit unsigned, exactly as persisted; the representable range ends in
/// February 2106.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u32);

impl Timestamp {
    pub const ZERO: Self = Self(0);
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    /// Build a timestamp from calendar fields.
    ///
    /// Returns `None` when the fields do not name a real instant (month 13,
    /// 31 April, ...) or the instant falls outside the 32-bit range.
    pub fn from_civil(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Option<Self> {
        let date = chrono::NaiveDate::from_ymd_opt(i32::from(year), month.into(), day.into())?;
        let instant = date.and_hms_opt(hour.into(), minute.into(), second.into())?;
        Self::from_unix(instant.and_utc().timestamp())
    }

    /// Narrow a signed Unix time to the 32-bit range.
    pub fn from_unix(secs: i64) -> Option<Self> {
        u32::try_from(secs).ok().map(Self)
    }

    pub const fn saturating_add(self, secs: u32) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds from `self` until `later`, zero if `later` has passed.
    pub const fn secs_until(self, later: Timestamp) -> u32 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    /// Formats in the console input grammar `YYYY-MM-DDTHH:MM:SS`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match chrono::DateTime::from_timestamp(i64::from(self.0), 0) {
            Some(instant) => write!(f, "{}", instant.format("%Y-%m-%dT%H:%M:%S")),
            None => write!(f, "@{}", self.0),
        }
    }
}
