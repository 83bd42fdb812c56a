//! Host real-time clocks.

use std::fs;
use std::path::{Path, PathBuf};

use lockbox_core::{Clock, ClockError, Timestamp};

use crate::error::{Result, RuntimeError};
use crate::storage::write_atomic;

fn host_now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn to_timestamp(secs: i64) -> std::result::Result<Timestamp, ClockError> {
    Timestamp::from_unix(secs).ok_or(ClockError::OutOfRange(secs))
}

/// The host's UTC clock. Read-only.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> std::result::Result<Timestamp, ClockError> {
        to_timestamp(host_now())
    }

    fn set_now(&mut self, _now: Timestamp) -> std::result::Result<(), ClockError> {
        Err(ClockError::SetFailed(
            "the system clock cannot be set from here".to_string(),
        ))
    }
}

/// Host time shifted by an offset kept in a file.
///
/// Stands in for the battery-backed RTC: setting the time stores the
/// difference to the host clock, so it survives restarts without touching the
/// host's own time.
#[derive(Clone, Debug)]
pub struct OffsetClock {
    path: PathBuf,
    offset_secs: i64,
}

impl OffsetClock {
    /// Load the offset at `path`; a missing file means no offset.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let offset_secs = if path.exists() {
            let text = fs::read_to_string(&path)?;
            text.trim()
                .parse::<i64>()
                .map_err(|_| RuntimeError::ClockOffset {
                    path: path.clone(),
                    value: text.trim().to_string(),
                })?
        } else {
            0
        };
        tracing::debug!("RTC offset {}s from {}", offset_secs, path.display());
        Ok(Self { path, offset_secs })
    }

    pub fn offset_secs(&self) -> i64 {
        self.offset_secs
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> std::result::Result<Timestamp, ClockError> {
        to_timestamp(host_now().saturating_add(self.offset_secs))
    }

    fn set_now(&mut self, now: Timestamp) -> std::result::Result<(), ClockError> {
        let offset_secs = i64::from(now.as_secs()) - host_now();
        write_atomic(&self.path, offset_secs.to_string().as_bytes())
            .map_err(|e| ClockError::SetFailed(e.to_string()))?;
        self.offset_secs = offset_secs;
        tracing::info!("RTC set to {} (offset {}s)", now, offset_secs);
        Ok(())
    }
}
