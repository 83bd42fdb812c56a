//! Common error infrastructure for lockbox-core.
//!
//! Domain-specific errors (`InputError`, `ConfigError`, `StoreError`, ...) live
//! next to the code that raises them. This module holds the classification
//! shared by all of them.
//!
//! - **Validation** errors come from operator input and are recovered locally
//!   by re-prompting.
//! - **Fatal** errors come from the collaborators (storage, serial, clock). The
//!   firmware had no failure path for these; on a host they must surface.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, re-prompt the same field.
    Validation,

    /// Fatal error - a collaborator failed or persisted state is corrupted.
    Fatal,
}

/// Common trait for all lockbox-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings suitable for logs and tests
pub trait LockboxError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
