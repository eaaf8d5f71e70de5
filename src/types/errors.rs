//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context. Attachment faults carry the declared
//! filename or path so a transport can report exactly which attachment failed.

use std::path::PathBuf;
use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fault raised when materializing an envelope item's payload bytes.
///
/// Raised only at read time; constructing items and assembling envelopes
/// never produces one of these.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Path exists but does not reference a regular file.
    #[error("reading the attachment {} failed, because the object at the path is not a regular file", .path.display())]
    NotAFile { path: PathBuf },

    /// Path does not reference an existing file, or the file cannot be opened.
    #[error("reading the attachment {} failed, because the file could not be found or opened", .path.display())]
    NotFound { path: PathBuf },

    /// The filesystem denies read access to the file.
    #[error("reading the attachment {} failed, because the process can't read the file", .path.display())]
    PermissionDenied { path: PathBuf },

    /// The process-wide read guard vetoed the read.
    #[error("reading the attachment {} failed, because the read guard denied access", .path.display())]
    AccessControlDenied { path: PathBuf },

    /// The attachment carries neither an in-memory buffer nor a path.
    #[error("couldn't attach the attachment {filename}: neither bytes nor a path is set")]
    MissingSource { filename: String },
}

impl DataLoadError {
    /// The declared filename or path of the attachment that failed.
    pub fn attachment_ref(&self) -> String {
        match self {
            Self::NotAFile { path }
            | Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::AccessControlDenied { path } => path.display().to_string(),
            Self::MissingSource { filename } => filename.clone(),
        }
    }
}

/// Main error enum for the envelope layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Payload serialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Attachment materialization errors.
    #[error("data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    /// I/O errors outside the attachment fault taxonomy.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn missing_source(filename: impl Into<String>) -> Self {
        Self::DataLoad(DataLoadError::MissingSource {
            filename: filename.into(),
        })
    }
}
