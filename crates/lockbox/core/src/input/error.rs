//! Input validation errors.
//!
//! Every rejection falls into one of four kinds (see [`InputErrorKind`]) and
//! names the part of the input that was wrong, so the console can print a
//! field-specific diagnostic before re-prompting.

use crate::error::{ErrorSeverity, LockboxError};
use crate::input::Field;

/// Classification of input rejections.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputErrorKind {
    InvalidLength,
    MissingOrMisplacedDelimiter,
    InvalidCharacterInField,
    LogicallyOutOfRange,
}

/// Part of an input line a character-level rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    #[strum(serialize = "Point count")]
    PointCount,
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
    #[strum(serialize = "First hyphen")]
    FirstHyphen,
    #[strum(serialize = "Second hyphen")]
    SecondHyphen,
    #[strum(serialize = "'T' delimiter")]
    TimeDelimiter,
    #[strum(serialize = "First colon")]
    FirstColon,
    #[strum(serialize = "Second colon")]
    SecondColon,
    #[strum(serialize = "Sign ('+' or '-')")]
    Sign,
    #[strum(serialize = "Decimal point")]
    DecimalPoint,
    #[strum(serialize = "Before decimal point")]
    IntegerDigits,
    #[strum(serialize = "After decimal point")]
    FractionDigits,
    #[strum(serialize = "Grace period value")]
    GraceMinutes,
}

/// Why a line of operator input was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The line is not exactly the length the grammar requires.
    #[error("Incorrect {field} input length (expected {expected} characters, got {actual}).")]
    InvalidLength {
        field: Field,
        expected: usize,
        actual: usize,
    },

    /// A fixed delimiter is missing or sits in the wrong place.
    #[error(
        "Required character (possibly delimiter) omitted or incorrectly placed. Character: {segment}"
    )]
    MissingOrMisplacedDelimiter {
        segment: Segment,
        position: usize,
        expected: char,
    },

    /// A character of the wrong class inside a field.
    #[error("Invalid character found in field. Field: {segment}")]
    InvalidCharacterInField { segment: Segment, position: usize },

    /// Well-formed, but outside the domain bounds.
    #[error("Value entered is logically invalid ({field}). Value must be {constraint}.")]
    LogicallyOutOfRange {
        field: Field,
        constraint: &'static str,
    },
}

impl InputError {
    pub const fn kind(&self) -> InputErrorKind {
        match self {
            Self::InvalidLength { .. } => InputErrorKind::InvalidLength,
            Self::MissingOrMisplacedDelimiter { .. } => InputErrorKind::MissingOrMisplacedDelimiter,
            Self::InvalidCharacterInField { .. } => InputErrorKind::InvalidCharacterInField,
            Self::LogicallyOutOfRange { .. } => InputErrorKind::LogicallyOutOfRange,
        }
    }

    /// Character position the error points at, if it is a positional error.
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::MissingOrMisplacedDelimiter { position, .. }
            | Self::InvalidCharacterInField { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl LockboxError for InputError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self.kind() {
            InputErrorKind::InvalidLength => "INPUT_INVALID_LENGTH",
            InputErrorKind::MissingOrMisplacedDelimiter => "INPUT_MISSING_DELIMITER",
            InputErrorKind::InvalidCharacterInField => "INPUT_INVALID_CHARACTER",
            InputErrorKind::LogicallyOutOfRange => "INPUT_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_range_messages_name_the_field() {
        let length = InputError::InvalidLength {
            field: Field::Latitude,
            expected: 11,
            actual: 10,
        };
        assert_eq!(
            length.to_string(),
            "Incorrect latitude input length (expected 11 characters, got 10)."
        );

        let range = InputError::LogicallyOutOfRange {
            field: Field::GraceDuration,
            constraint: "between 1 and 60 (inclusive)",
        };
        assert_eq!(
            range.to_string(),
            "Value entered is logically invalid (grace duration). Value must be between 1 and 60 (inclusive)."
        );
        assert_eq!(range.severity(), ErrorSeverity::Validation);
        assert_eq!(range.error_code(), "INPUT_OUT_OF_RANGE");
    }
}
