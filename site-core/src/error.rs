//! Error types for document operations.

use thiserror::Error;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur in document operations.
///
/// Lookups of unknown component ids are not errors; mutators report them
/// by returning `false`.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Attempted to delete the only remaining page.
    #[error("Cannot delete the last page")]
    LastPage,

    /// Page not found in the document.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Imported data is neither a snapshot nor a legacy design.
    #[error("Invalid design file: {0}")]
    InvalidImport(String),

    /// No built-in template with this name.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Design serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
