//! Error types for the mdrift core library.

use std::path::PathBuf;

/// Errors that can occur while checking a registry table for drift.
///
/// Every variant is fatal: the checker has no recovery path. Its whole
/// purpose is to fail visibly when its one invariant is violated.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The registry document could not be read.
    #[error("cannot read document {path}: {source}")]
    Read {
        /// Path of the document that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The listing command could not be spawned.
    #[error("cannot run listing command '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The listing command ran but exited with a non-zero status.
    #[error("listing command '{program}' exited with status {code:?}")]
    ListingFailed {
        /// Program that failed
        program: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// The listing command produced output that is not valid UTF-8.
    #[error("listing command '{program}' produced non-UTF-8 output")]
    ListingDecode {
        /// Program whose output could not be decoded
        program: String,
        /// Underlying decode error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Convenience `Result` type alias for mdrift operations.
pub type Result<T> = std::result::Result<T, Error>;
