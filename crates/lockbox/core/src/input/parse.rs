//! Conversions from grammar-checked text to typed values.
//!
//! These assume the matching validator in [`super::validate`] has accepted
//! the text; they do not re-check the grammar.

use crate::input::validate::digits_value;
use crate::state::Timestamp;

/// Point count `'1'..='5'` → number.
pub fn point_count(text: &[u8]) -> u8 {
    text[0] - b'0'
}

/// `YYYY-MM-DDTHH:MM:SS` → UTC timestamp.
///
/// `None` if the fields do not name a real instant inside the 32-bit range.
pub fn date_time(text: &[u8]) -> Option<Timestamp> {
    let field = |range: core::ops::Range<usize>| digits_value(&text[range]);
    Timestamp::from_civil(
        field(0..4) as u16,
        field(5..7) as u8,
        field(8..10) as u8,
        field(11..13) as u8,
        field(14..16) as u8,
        field(17..19) as u8,
    )
}

/// `±D…D.DDDDDDD` → signed degrees × 10^7.
///
/// The sign and decimal point are dropped, the remaining digits read in
/// order as the magnitude, and the sign reapplied.
pub fn coordinate(text: &[u8]) -> i64 {
    let magnitude = text[1..]
        .iter()
        .filter(|byte| byte.is_ascii_digit())
        .fold(0i64, |acc, byte| acc * 10 + i64::from(byte - b'0'));
    if text[0] == b'-' { -magnitude } else { magnitude }
}

/// `MM` minutes → seconds.
pub fn grace_secs(text: &[u8]) -> u32 {
    digits_value(text) * 60
}
