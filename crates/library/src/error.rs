//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a job failure.
///
/// Per-image problems (missing or unreadable files) never surface here; they
/// degrade to blank fields. These variants cover what stops a job outright.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The input table is missing or not valid CSV.
    #[display("failed to read table: {}", _0.display())]
    ReadTable(#[error(not(source))] PathBuf),
    /// The output table could not be written.
    #[display("failed to write table: {}", _0.display())]
    WriteTable(#[error(not(source))] PathBuf),
    /// The input table is not valid in the declared encoding.
    #[display("table is not valid {encoding}: {}", path.display())]
    Encoding {
        path: PathBuf,
        encoding: &'static str,
    },
    /// The requested photographer has no `originals` folder.
    #[display("unknown photographer: {_0}")]
    UnknownPhotographer(#[error(not(source))] String),
    /// An image-tree operation via [`mosaic_storage`] failed.
    #[display("image storage operation failed")]
    Storage,
    /// A record's size variants could not be encoded as JSON.
    #[display("failed to encode sizes_info for {_0}")]
    SizesInfo(#[error(not(source))] String),
    /// A URL template could not be compiled or rendered.
    #[display("issue with URL generation from template")]
    Template,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::WriteTable(_))
    }
}
