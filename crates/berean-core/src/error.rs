//! Error types for berean-core
//!
//! Two error classes cross the library boundary:
//!
//! - [`ValidationError`]: the caller's input was rejected before any
//!   store mutation happened. Safe to show inline to the user.
//! - [`StoreError`]: the underlying database or filesystem failed.
//!   Surfaced with context, never retried automatically.
//!
//! Data-integrity findings (missing canonical books, discontiguous
//! groups after member removal, duplicate highlights) are not errors:
//! they are logged via `tracing::warn!` and never block an operation.

use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before any store mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Note content was empty (after trimming)
    #[error("Note cannot be empty")]
    EmptyNote,

    /// A verse reference did not match `Book:chapter:verse`
    #[error("Invalid verse reference '{0}' (expected e.g. John:3:16)")]
    InvalidReference(String),

    /// Referenced book is not part of the canon
    #[error("Unknown book '{0}'")]
    UnknownBook(String),

    /// No verses were selected for grouping
    #[error("No verses selected")]
    EmptySelection,

    /// Selected verses are not consecutive
    #[error("Only consecutive verses can be grouped (e.g. 3-4-5)")]
    NonContiguousSelection,

    /// Text annotation range was empty or inverted
    #[error("Annotation range is empty: start {start} must be less than end {end}")]
    EmptyRange { start: usize, end: usize },

    /// Text annotation overlaps an existing annotation on the same
    /// verse and language
    #[error("Annotation range {start}..{end} overlaps an existing annotation")]
    OverlappingAnnotation { start: usize, end: usize },

    /// No group with the given id exists
    #[error("Verse group not found: {0}")]
    GroupNotFound(String),
}

/// Underlying read/write failure
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to read a file (corpus import, drawing payload)
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A corpus file did not have the expected top-level shape
    #[error("Invalid corpus file '{path}': {details}")]
    InvalidCorpus { path: PathBuf, details: String },

    /// A persisted column could not be decoded (style JSON, group refs)
    #[error("Corrupt record in table '{table}': {details}")]
    CorruptRecord { table: &'static str, details: String },
}

/// Any error a core operation can return
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Store(StoreError::Database(e))
    }
}

/// Result type for core operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
