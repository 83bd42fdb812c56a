//! Collaborator interfaces consumed by the lockbox.
//!
//! The lockbox never talks to hardware directly. Non-volatile storage, the
//! real-time clock and the serial console are reached through these traits so
//! the same rules run on firmware, on a host simulator and in tests.

mod clock;
mod serial;
mod storage;

pub use clock::{Clock, ClockError, FixedClock};
pub use serial::{ScriptedSerial, SerialError, SerialPort};
pub use storage::{MemoryStorage, Storage, StorageError};
