//! Error types for the Tilt data layer.

use std::path::PathBuf;
use thiserror::Error;

/// Shared error type for store and facade operations.
///
/// The variants are typed so the consuming UI can tell recoverable
/// conditions (a locked store, a corrupt backing file) apart from plain
/// IO failures.
#[derive(Error, Debug)]
pub enum TiltError {
    /// The backing file exists but could not be parsed into the entry list.
    /// The file is left on disk untouched; the caller decides whether to
    /// abort or offer recovery.
    #[error("log file {} is corrupted: {source}", .path.display())]
    StorageCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Another session holds the advisory lock on the store.
    #[error("log file {} is locked by another session", .path.display())]
    StoreLocked { path: PathBuf },

    /// A structurally impossible record was submitted. Field ranges are
    /// clamped at input time and never reach this.
    #[error("invalid record: {0}")]
    Validation(String),

    /// IO error (file system operations).
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TiltError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an IO error carrying the affected path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this is a corruption error
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::StorageCorruption { .. })
    }

    /// Check if this is a lock conflict
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::StoreLocked { .. })
    }
}

/// A type alias for `Result<T, TiltError>`.
pub type Result<T> = std::result::Result<T, TiltError>;
