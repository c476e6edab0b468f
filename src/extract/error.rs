//! Extraction error types

use thiserror::Error;

use crate::rules::RuleError;

/// Errors from the extraction job and its text-layer provider
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document is not registered.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// No text layer has been ingested for the page.
    #[error("no text layer for page {page} of document {document_id}")]
    TextLayerMissing { document_id: String, page: u32 },

    /// A stored text layer could not be decoded.
    #[error("corrupt text layer for page {page}: {message}")]
    CorruptTextLayer { page: u32, message: String },

    /// The slicer's processing rules could not be resolved.
    #[error("invalid processing rules: {0}")]
    Rules(#[from] RuleError),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}
