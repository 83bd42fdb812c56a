//! Host runtime for the lockbox.
//!
//! Provides file- and OS-backed implementations of the collaborator traits
//! defined in `lockbox-core`, and the [`LockController`] that turns clock
//! readings and GPS fixes into lock decisions.
//!
//! Modules are organized by responsibility:
//! - [`storage`] keeps the EEPROM image on disk
//! - [`clock`] reads (and on a host, simulates setting) UTC time
//! - [`serial`] bridges a byte stream such as stdio to the console protocol
//! - [`controller`] evaluates one control-loop step
pub mod clock;
pub mod controller;
pub mod error;
pub mod serial;
pub mod storage;

pub use clock::{OffsetClock, SystemClock};
pub use controller::{LockController, LockStatus, Verdict};
pub use error::{Result, RuntimeError};
pub use serial::StdioSerial;
pub use storage::FileStorage;
