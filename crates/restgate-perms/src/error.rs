//! Error types for the permissions module.

use thiserror::Error;

/// Errors that can occur while reading permission values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermsError {
    /// A name in the text form is not a known permission.
    #[error("unknown permission name: {0:?}")]
    UnknownName(String),

    /// The text form contains an empty entry, e.g. `"list||get"`.
    #[error("empty permission name in {0:?}")]
    EmptyName(String),

    /// The numeric form sets bits outside the five operation flags.
    #[error("unknown permission bits: {0:#x}")]
    UnknownBits(u64),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
