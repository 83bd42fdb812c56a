//! Serial configuration console for the lockbox.
//!
//! [`ConfigWizard`] walks the operator through entering a game over a
//! byte-oriented serial link. Lines are collected by [`LineReader`] and every
//! field is checked with the strict grammars in `lockbox_core::input`; a
//! rejected entry prints a diagnostic and the field is asked again.
pub mod line;
pub mod messages;
pub mod wizard;

pub use line::LineReader;
pub use messages::PointRole;
pub use wizard::{ConfigWizard, WizardError, WizardOptions};
