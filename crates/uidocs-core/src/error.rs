//! Error types and handling for uidocs-core operations.
//!
//! Most fetch-level failures never surface through this type: strategy
//! failures are carried inside [`crate::FetchResult`] so the orchestrator
//! can fall through to the next strategy, and cache faults always degrade
//! to a miss. `Error` covers the remaining hard failures (configuration,
//! storage plumbing, client construction).

use thiserror::Error;

/// The main error type for uidocs-core operations.
///
/// All public fallible functions in uidocs-core return `Result<T, Error>`.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// The underlying `reqwest::Error` is preserved for detailed
    /// connection information.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Content could not be parsed (HTML, JSON, or Markdown structure).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Cache storage operation failed.
    ///
    /// Covers persistence operations beyond basic file I/O: entry
    /// serialization, atomic write commits, directory management.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operation exceeded its time budget.
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl Error {
    /// Whether a retry might succeed for this error.
    ///
    /// Network interruptions and timeouts are transient; configuration
    /// and parse errors are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_) | Self::Io(_))
    }

    /// Coarse category string used in diagnostics.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Convenient result alias for uidocs-core operations.
pub type Result<T> = std::result::Result<T, Error>;
