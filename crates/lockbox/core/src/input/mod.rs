//! Console input: grammar validation, parsing and range checks.
//!
//! The `read_*` functions run all three steps for one field and are what the
//! configuration wizard calls. [`validate`] and [`parse`] expose the steps on
//! their own.

mod error;
pub mod parse;
pub mod validate;

pub use error::{InputError, InputErrorKind, Segment};

use crate::state::Timestamp;

/// Fields the operator enters on the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    #[strum(serialize = "point count")]
    PointCount,
    #[strum(serialize = "date/time")]
    DateTime,
    #[strum(serialize = "latitude")]
    Latitude,
    #[strum(serialize = "longitude")]
    Longitude,
    #[strum(serialize = "grace duration")]
    GraceDuration,
}

impl Field {
    /// Exact length of a well-formed entry, which is also the line limit.
    pub const fn max_len(self) -> usize {
        match self {
            Self::PointCount => 1,
            Self::DateTime => 19,
            Self::Latitude => 11,
            Self::Longitude => 12,
            Self::GraceDuration => 2,
        }
    }
}

/// Longest line any field accepts.
pub const MAX_LINE_LEN: usize = Field::DateTime.max_len();

/// Number of checkpoints, `1..=5`.
pub fn read_point_count(text: &[u8]) -> Result<u8, InputError> {
    validate::point_count(text)?;
    Ok(parse::point_count(text))
}

/// Absolute UTC date/time.
pub fn read_date_time(text: &[u8]) -> Result<Timestamp, InputError> {
    validate::date_time(text)?;
    parse::date_time(text).ok_or(InputError::LogicallyOutOfRange {
        field: Field::DateTime,
        constraint: "a real calendar date and time no later than 2106-02-07T06:28:15",
    })
}

/// Game start: a date/time not before `now`.
pub fn read_start_time(text: &[u8], now: Timestamp) -> Result<Timestamp, InputError> {
    validate::not_in_past(read_date_time(text)?, now)
}

/// Latitude in degrees × 10^7.
pub fn read_latitude(text: &[u8]) -> Result<i32, InputError> {
    validate::latitude(text)?;
    validate::latitude_range(parse::coordinate(text))
}

/// Longitude in degrees × 10^7.
pub fn read_longitude(text: &[u8]) -> Result<i32, InputError> {
    validate::longitude(text)?;
    validate::longitude_range(parse::coordinate(text))
}

/// Grace window in seconds, 60..=3600.
pub fn read_grace_secs(text: &[u8]) -> Result<u32, InputError> {
    validate::grace_duration(text)?;
    validate::grace_range(parse::grace_secs(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_each_field() {
        assert_eq!(read_point_count(b"2"), Ok(2));
        assert_eq!(
            read_date_time(b"2021-12-25T02:00:00"),
            Ok(Timestamp(1_640_397_600))
        );
        assert_eq!(read_latitude(b"+12.1234567"), Ok(121_234_567));
        assert_eq!(read_longitude(b"-010.9876543"), Ok(-109_876_543));
        assert_eq!(read_grace_secs(b"15"), Ok(900));
    }

    #[test]
    fn grammar_errors_win_over_range_errors() {
        assert_eq!(
            read_latitude(b"+95.000000").unwrap_err().kind(),
            InputErrorKind::InvalidLength
        );
    }

    #[test]
    fn range_pass_rejects_well_formed_values() {
        assert_eq!(
            read_latitude(b"+90.0000001").unwrap_err().kind(),
            InputErrorKind::LogicallyOutOfRange
        );
        assert_eq!(read_latitude(b"-90.0000000"), Ok(-900_000_000));
        assert_eq!(
            read_longitude(b"-180.0000001").unwrap_err().kind(),
            InputErrorKind::LogicallyOutOfRange
        );
        assert_eq!(
            read_grace_secs(b"00").unwrap_err().kind(),
            InputErrorKind::LogicallyOutOfRange
        );
        assert_eq!(
            read_grace_secs(b"61").unwrap_err().kind(),
            InputErrorKind::LogicallyOutOfRange
        );
        assert_eq!(
            read_date_time(b"2021-13-01T00:00:00").unwrap_err().kind(),
            InputErrorKind::LogicallyOutOfRange
        );
    }

    #[test]
    fn start_time_compares_against_clock() {
        let now = Timestamp(1_640_397_600);
        assert_eq!(read_start_time(b"2021-12-25T02:00:00", now), Ok(now));
        assert_eq!(
            read_start_time(b"2021-12-25T01:59:59", now)
                .unwrap_err()
                .kind(),
            InputErrorKind::LogicallyOutOfRange
        );
    }

    #[test]
    fn line_limits_match_grammars() {
        assert_eq!(MAX_LINE_LEN, 19);
        assert_eq!(Field::Latitude.max_len(), b"+12.1234567".len());
        assert_eq!(Field::Longitude.max_len(), b"-010.9876543".len());
    }
}
