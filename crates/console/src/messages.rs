//! Console text: prompts, help blocks and diagnostics.

use lockbox_core::{Field, InputError};

pub const NEWLINE: &str = "\r\n";

/// Printed before every entry.
pub const PROMPT: &str = ": ";

/// ANSI erase display, then cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub const SPLASH: &[&str] = &[
    "+-------------------------+",
    "|                         |",
    "|    Timed GPS Lockbox    |",
    "|      Initial Setup      |",
    "|                         |",
    "+-------------------------+",
    "To continue, press any key...",
];

pub const POINT_COUNT: &[&str] = &["How many 4D points do you wish to configure? (Between 1 and 5)."];

pub const GAME_START: &[&str] = &[
    "Enter the UTC date/time value for when you wish the game to start.",
    "At this date and time the first location hint will be revealed to the user.",
];

pub const TIME_FORMAT: &[&str] = &[
    "UTC TIME UTC TIME UTC TIME UTC TIME UTC TIME UTC TIME UTC TIME UTC TIME",
    "Formatting:",
    "    Must be of format YYYY-MM-DDTHH:MM:SS.",
    "    Time must be in 24 hour format.",
    "    The hyphens, colons and 'T' characters are required.",
    "    Leading zeros are required for single digit days, months and times.",
    "Examples:",
    "    2020-04-03T23:53:26 <- 3rd April 2020 at 11:53PM and 26 seconds UTC.",
    "    2021-12-25T02:00:00 <- 25th December 2021 at 2:00AM UTC.",
];

pub const LATITUDE_FORMAT: &[&str] = &[
    "Formatting:",
    "    Must have a + or - prepended to it.",
    "    Must be formatted with two digits prior to the decimal point.",
    "    Must be formatted with seven digits following the decimal point.",
    "    Leading and trailing zeros are permitted; use as much precision as you have.",
    "Examples:",
    "    +12.1234567 <- Acceptable form and precision of positive.",
    "    -01.9876543 <- Acceptable form and precision of negative.",
    "    +02.1234500 <- Acceptable form of positive but unideal precision.",
    "    -11.1234500 <- Acceptable form of negative but unideal precision.",
];

pub const LONGITUDE_FORMAT: &[&str] = &[
    "Formatting:",
    "    Must have a + or - prepended to it.",
    "    Must be formatted with three digits prior to the decimal point.",
    "    Must be formatted with seven digits following the decimal point.",
    "    Leading and trailing zeros are permitted; use as much precision as you have.",
    "Examples:",
    "    +102.1234567 <- Acceptable form and precision of positive.",
    "    -010.9876543 <- Acceptable form and precision of negative.",
    "    +002.1234500 <- Acceptable form of positive but unideal precision.",
    "    -110.1234500 <- Acceptable form of negative but unideal precision.",
];

pub const GRACE_WINDOW: &[&str] = &[
    "Enter the value (in minutes) for how long you wish the grace window to last.",
    "This is how long the unit stays accessible after the hint is revealed or the unlock time is reached.",
    "It allows for arriving at the location late and still being able to continue.",
    "The value must be between 1 and 60 (1 minute to an hour).",
    "Formatting:",
    "    Must be of format MM.",
    "    Leading zeros are required for cases like '01' and '05'.",
    "Examples:",
    "    01 <- 1 Minute.",
    "    15 <- 15 Minutes.",
];

pub const LOCK_INSTRUCTION: &str = "Cycle unlock key (to locked state) to lock unit.";

/// What a checkpoint does once reached. Only the prompt wording differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointRole {
    /// Reaching it reveals the next hint.
    NextHint,
    /// Reaching it opens the box.
    FinalUnlock,
}

impl PointRole {
    pub const fn for_point(number: usize, total: usize) -> Self {
        if number == total {
            Self::FinalUnlock
        } else {
            Self::NextHint
        }
    }

    const fn location_noun(self) -> &'static str {
        match self {
            Self::NextHint => "next hint reveal location",
            Self::FinalUnlock => "final unlock location",
        }
    }

    pub fn latitude_prompt(self) -> String {
        format!("Enter the latitude value of the {}", self.location_noun())
    }

    pub fn longitude_prompt(self) -> String {
        format!("Enter the longitude value of the {}", self.location_noun())
    }

    pub fn window_open_prompt(self) -> &'static str {
        match self {
            Self::NextHint => "Enter the UTC date/time value of the next hint reveal.",
            Self::FinalUnlock => "Enter the UTC date/time value for when you wish the unit to unlock.",
        }
    }
}

/// Help block shown before a coordinate prompt.
pub fn coordinate_format(field: Field) -> &'static [&'static str] {
    match field {
        Field::Longitude => LONGITUDE_FORMAT,
        _ => LATITUDE_FORMAT,
    }
}

pub fn entry_too_long(max_len: usize) -> String {
    format!("Entry too long. Maximum input length is {max_len} characters.")
}

/// One-line diagnostic for a rejected entry.
pub fn diagnostic(err: &InputError) -> String {
    format!("INVALID: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockbox_core::Segment;

    #[test]
    fn last_point_unlocks() {
        assert_eq!(PointRole::for_point(1, 3), PointRole::NextHint);
        assert_eq!(PointRole::for_point(3, 3), PointRole::FinalUnlock);
        assert_eq!(PointRole::for_point(1, 1), PointRole::FinalUnlock);
    }

    #[test]
    fn prompts_name_the_role() {
        assert_eq!(
            PointRole::FinalUnlock.latitude_prompt(),
            "Enter the latitude value of the final unlock location"
        );
        assert_eq!(
            PointRole::NextHint.longitude_prompt(),
            "Enter the longitude value of the next hint reveal location"
        );
        assert!(PointRole::NextHint.window_open_prompt().ends_with("of the next hint reveal."));
    }

    #[test]
    fn diagnostics_are_prefixed() {
        let err = InputError::InvalidCharacterInField {
            segment: Segment::Month,
            position: 5,
        };
        assert_eq!(
            diagnostic(&err),
            "INVALID: Invalid character found in field. Field: Month"
        );
    }

    #[test]
    fn coordinate_help_matches_field() {
        let latitude = coordinate_format(Field::Latitude);
        assert!(latitude.iter().any(|line| line.contains("+12.1234567")));
        let longitude = coordinate_format(Field::Longitude);
        assert!(longitude.iter().any(|line| line.contains("three digits")));
    }
}
