//! Configuration invariant errors.

use crate::error::{ErrorSeverity, LockboxError};
use crate::state::Timestamp;

/// Errors raised when a [`GameConfig`](super::GameConfig) or
/// [`Checkpoint`](super::Checkpoint) would violate its invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// A game needs at least one checkpoint.
    #[error("a game needs at least one checkpoint")]
    NoCheckpoints,

    /// More checkpoints than the device can hold.
    #[error("too many checkpoints (max: {max}, requested: {requested})")]
    TooManyCheckpoints { max: usize, requested: usize },

    /// A window closes before it opens.
    #[error("checkpoint window closes at {close} before it opens at {open}")]
    WindowInverted { open: Timestamp, close: Timestamp },

    /// The progress pointer lies past the last checkpoint.
    #[error("current index {index} is out of range for {count} checkpoints")]
    IndexOutOfRange { index: usize, count: usize },
}

impl LockboxError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoCheckpoints => "CONFIG_NO_CHECKPOINTS",
            Self::TooManyCheckpoints { .. } => "CONFIG_TOO_MANY_CHECKPOINTS",
            Self::WindowInverted { .. } => "CONFIG_WINDOW_INVERTED",
            Self::IndexOutOfRange { .. } => "CONFIG_INDEX_OUT_OF_RANGE",
        }
    }
}
