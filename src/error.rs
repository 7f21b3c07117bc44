//! Error types for library loading and symbol resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for loader operations.
///
/// Every variant carries the platform diagnostic captured at the point of
/// failure, so callers can report the problem without re-querying the OS.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The OS loader could not open the module at the given path.
    #[error("failed to load library '{}': {reason}", .path.display())]
    Load {
        /// Path the load was attempted with.
        path: PathBuf,
        /// Platform diagnostic text.
        reason: String,
    },

    /// The requested symbol could not be resolved.
    #[error("failed to resolve symbol '{name}': {reason}")]
    SymbolNotFound {
        /// The symbol name as given by the caller.
        name: String,
        /// Platform diagnostic text.
        reason: String,
    },
}

impl Error {
    /// True if this is a library-load failure.
    pub fn is_load(&self) -> bool {
        matches!(self, Error::Load { .. })
    }

    /// True if this is a symbol-resolution failure.
    pub fn is_symbol_not_found(&self) -> bool {
        matches!(self, Error::SymbolNotFound { .. })
    }
}
