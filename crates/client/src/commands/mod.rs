//! Subcommands of the `lockbox` binary, one per file.

mod advance;
mod clock;
mod dump;
mod extend;
mod poll;
mod reset;
mod setup;
mod status;

pub use advance::Advance;
pub use clock::ClockCommand;
pub use dump::Dump;
pub use extend::Extend;
pub use poll::Poll;
pub use reset::Reset;
pub use setup::Setup;
pub use status::Status;
