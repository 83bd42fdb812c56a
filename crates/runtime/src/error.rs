//! Error types raised by the host runtime.

use std::path::PathBuf;

use lockbox_core::{ClockError, ErrorSeverity, LockboxError, StoreError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("EEPROM image {} is {actual} bytes, expected {expected}", path.display())]
    ImageSize {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("clock offset file {} holds {value:?}, not a whole number of seconds", path.display())]
    ClockOffset { path: PathBuf, value: String },
}

impl LockboxError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Store(e) => e.severity(),
            Self::Clock(e) => e.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "RUNTIME_IO",
            Self::Store(e) => e.error_code(),
            Self::Clock(e) => e.error_code(),
            Self::ImageSize { .. } => "RUNTIME_IMAGE_SIZE",
            Self::ClockOffset { .. } => "RUNTIME_CLOCK_OFFSET",
        }
    }
}
