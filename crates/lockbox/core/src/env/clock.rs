//! Real-time clock collaborator.

use crate::error::{ErrorSeverity, LockboxError};
use crate::state::Timestamp;

/// Errors raised by clock collaborators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The clock refused or failed to store the new time.
    #[error("failed to set clock: {0}")]
    SetFailed(String),

    /// The clock reading is outside the representable range.
    #[error("clock reading {0} is outside the 32-bit timestamp range")]
    OutOfRange(i64),
}

impl LockboxError for ClockError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SetFailed(_) => "CLOCK_SET_FAILED",
            Self::OutOfRange(_) => "CLOCK_OUT_OF_RANGE",
        }
    }
}

/// UTC wall clock.
pub trait Clock {
    /// Current UTC time.
    fn now(&self) -> Result<Timestamp, ClockError>;

    /// Set the current UTC time.
    fn set_now(&mut self, now: Timestamp) -> Result<(), ClockError>;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&self) -> Result<Timestamp, ClockError> {
        (**self).now()
    }

    fn set_now(&mut self, now: Timestamp) -> Result<(), ClockError> {
        (**self).set_now(now)
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    now: Timestamp,
}

impl FixedClock {
    pub const fn new(now: Timestamp) -> Self {
        Self { now }
    }

    /// Move the clock forward by `secs`.
    pub fn advance_by(&mut self, secs: u32) {
        self.now = self.now.saturating_add(secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<Timestamp, ClockError> {
        Ok(self.now)
    }

    fn set_now(&mut self, now: Timestamp) -> Result<(), ClockError> {
        self.now = now;
        Ok(())
    }
}
