//! Checkpoint data model.
//!
//! [`GameConfig`] is the single aggregate the lockbox operates on: an ordered
//! run of [`Checkpoint`]s plus the game-level metadata. It is an owned value;
//! persistence happens only at the explicit `load`/`save` boundary in
//! [`crate::store`].

mod checkpoint;
mod error;
mod game;
mod location;
mod timestamp;

pub use checkpoint::Checkpoint;
pub use error::ConfigError;
pub use game::{Checkpoints, GameConfig};
pub use location::Location;
pub use timestamp::Timestamp;
