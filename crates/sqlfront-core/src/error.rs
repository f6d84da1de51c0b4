//! Errors that prevent a lexer from being constructed at all.
//!
//! Problems in the input text itself are never reported through these types;
//! they become diagnostics on the [`Driver`](crate::Driver).

use std::path::PathBuf;

/// The source could not be read.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be opened.
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Reading from the stream failed.
    #[error("cannot read '{name}': {source}")]
    Read {
        /// Label of the stream.
        name: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for constructing lexers and parsers from streams.
pub type Result<T> = std::result::Result<T, SourceError>;
