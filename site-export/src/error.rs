//! Error types for the export pipeline.

use thiserror::Error;

/// Errors that can occur while exporting a design.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A design with no pages cannot be exported.
    #[error("Nothing to export: the design has no pages")]
    NoPages,

    /// Unrecognised export target name.
    #[error("Unknown export target: {0}")]
    UnknownTarget(String),

    /// Artifact file name would escape the output directory.
    #[error("Invalid artifact file name: {0}")]
    InvalidFileName(String),

    /// Writing artifacts failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The core document layer rejected the design.
    #[error(transparent)]
    Document(#[from] site_core::DocumentError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
