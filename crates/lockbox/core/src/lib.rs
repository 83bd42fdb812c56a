//! Checkpoint rules and persisted layout for the timed GPS lockbox.
//!
//! `lockbox-core` defines the data model ([`GameConfig`], [`Checkpoint`]),
//! the strict console input grammar ([`input`]), the fixed binary image kept
//! in non-volatile storage ([`codec`], [`CheckpointStore`]) and the
//! progression API the lock-control loop drives ([`GameSession`]).
//! Hardware is reached only through the collaborator traits in [`env`].
pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod input;
pub mod session;
pub mod state;
pub mod store;
pub mod temporal;

pub use config::LockboxConfig;
pub use env::{
    Clock, ClockError, FixedClock, MemoryStorage, ScriptedSerial, SerialError, SerialPort,
    Storage, StorageError,
};
pub use error::{ErrorSeverity, LockboxError};
pub use input::{Field, InputError, InputErrorKind, Segment};
pub use session::GameSession;
pub use state::{Checkpoint, Checkpoints, ConfigError, GameConfig, Location, Timestamp};
pub use store::{CheckpointStore, StoreError};
pub use temporal::{CheckpointPhase, TimeSpan};
