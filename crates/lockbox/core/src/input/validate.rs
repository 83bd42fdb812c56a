//! Strict validators for console input.
//!
//! Two passes, both required:
//!
//! 1. **Grammar**: exact length, then each position checked left to right
//!    against its character class. No trimming, no locale. The first failure
//!    is reported.
//! 2. **Range**: the parsed value checked against its domain bounds.

use crate::config::LockboxConfig;
use crate::input::{Field, InputError, Segment};
use crate::state::Timestamp;

fn expect_len(text: &[u8], field: Field) -> Result<(), InputError> {
    let expected = field.max_len();
    if text.len() == expected {
        Ok(())
    } else {
        Err(InputError::InvalidLength {
            field,
            expected,
            actual: text.len(),
        })
    }
}

fn expect_digits(
    text: &[u8],
    positions: core::ops::Range<usize>,
    segment: Segment,
) -> Result<(), InputError> {
    for position in positions {
        if !text[position].is_ascii_digit() {
            return Err(InputError::InvalidCharacterInField { segment, position });
        }
    }
    Ok(())
}

fn expect_byte(text: &[u8], position: usize, expected: u8, segment: Segment) -> Result<(), InputError> {
    if text[position] == expected {
        Ok(())
    } else {
        Err(InputError::MissingOrMisplacedDelimiter {
            segment,
            position,
            expected: char::from(expected),
        })
    }
}

/// Value of the ASCII digits in `text` (already validated as digits).
pub(crate) fn digits_value(text: &[u8]) -> u32 {
    text.iter()
        .fold(0u32, |acc, byte| acc * 10 + u32::from(byte - b'0'))
}

// ============================================================================
// Grammar pass
// ============================================================================

/// Exactly one character, `'1'..='5'`.
pub fn point_count(text: &[u8]) -> Result<(), InputError> {
    expect_len(text, Field::PointCount)?;
    expect_digits(text, 0..1, Segment::PointCount)?;
    if !(b'1'..=b'5').contains(&text[0]) {
        return Err(InputError::LogicallyOutOfRange {
            field: Field::PointCount,
            constraint: "between 1 and 5 (inclusive)",
        });
    }
    Ok(())
}

/// `YYYY-MM-DDTHH:MM:SS`, year 1970 or later.
pub fn date_time(text: &[u8]) -> Result<(), InputError> {
    expect_len(text, Field::DateTime)?;

    expect_digits(text, 0..4, Segment::Year)?;
    // The RTC stores the year as a one-byte offset from 1970.
    if digits_value(&text[0..4]) < u32::from(LockboxConfig::EPOCH_YEAR) {
        return Err(InputError::LogicallyOutOfRange {
            field: Field::DateTime,
            constraint: "in the year 1970 or later",
        });
    }
    expect_byte(text, 4, b'-', Segment::FirstHyphen)?;
    expect_digits(text, 5..7, Segment::Month)?;
    expect_byte(text, 7, b'-', Segment::SecondHyphen)?;
    expect_digits(text, 8..10, Segment::Day)?;
    expect_byte(text, 10, b'T', Segment::TimeDelimiter)?;
    expect_digits(text, 11..13, Segment::Hours)?;
    expect_byte(text, 13, b':', Segment::FirstColon)?;
    expect_digits(text, 14..16, Segment::Minutes)?;
    expect_byte(text, 16, b':', Segment::SecondColon)?;
    expect_digits(text, 17..19, Segment::Seconds)
}

/// `±DD.DDDDDDD`
pub fn latitude(text: &[u8]) -> Result<(), InputError> {
    coordinate(text, Field::Latitude)
}

/// `±DDD.DDDDDDD`
pub fn longitude(text: &[u8]) -> Result<(), InputError> {
    coordinate(text, Field::Longitude)
}

fn coordinate(text: &[u8], field: Field) -> Result<(), InputError> {
    expect_len(text, field)?;
    let point = field.max_len() - 8;

    if text[0] != b'+' && text[0] != b'-' {
        return Err(InputError::InvalidCharacterInField {
            segment: Segment::Sign,
            position: 0,
        });
    }
    expect_byte(text, point, b'.', Segment::DecimalPoint)?;
    expect_digits(text, 1..point, Segment::IntegerDigits)?;
    expect_digits(text, point + 1..text.len(), Segment::FractionDigits)
}

/// `MM`: two digits, whole minutes.
pub fn grace_duration(text: &[u8]) -> Result<(), InputError> {
    expect_len(text, Field::GraceDuration)?;
    expect_digits(text, 0..2, Segment::GraceMinutes)
}

// ============================================================================
// Range pass
// ============================================================================

/// Latitude magnitude at most 90°.
pub fn latitude_range(value: i64) -> Result<i32, InputError> {
    within(value, LockboxConfig::MAX_LATITUDE).ok_or(InputError::LogicallyOutOfRange {
        field: Field::Latitude,
        constraint: "between -90 and +90",
    })
}

/// Longitude magnitude at most 180°.
pub fn longitude_range(value: i64) -> Result<i32, InputError> {
    within(value, LockboxConfig::MAX_LONGITUDE).ok_or(InputError::LogicallyOutOfRange {
        field: Field::Longitude,
        constraint: "between -180 and +180",
    })
}

fn within(value: i64, limit: i32) -> Option<i32> {
    if value.abs() <= i64::from(limit) {
        i32::try_from(value).ok()
    } else {
        None
    }
}

/// Grace window between one minute and one hour.
pub fn grace_range(secs: u32) -> Result<u32, InputError> {
    if (LockboxConfig::MIN_GRACE_SECS..=LockboxConfig::MAX_GRACE_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(InputError::LogicallyOutOfRange {
            field: Field::GraceDuration,
            constraint: "between 1 and 60 (inclusive)",
        })
    }
}

/// Game start must not lie before the clock's current reading.
pub fn not_in_past(start: Timestamp, now: Timestamp) -> Result<Timestamp, InputError> {
    if start < now {
        Err(InputError::LogicallyOutOfRange {
            field: Field::DateTime,
            constraint: "later than the current date/time",
        })
    } else {
        Ok(start)
    }
}
