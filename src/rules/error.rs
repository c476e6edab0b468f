//! Rule engine error types

use thiserror::Error;

/// Errors raised at rule mutation or resolution time
///
/// All variants are raised synchronously and leave the aggregate untouched;
/// a failed mutation never commits partial state.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    /// Page numbers are 1-based; zero (or a negative number in the wire
    /// format) is never silently included.
    #[error("page numbers are 1-based, got {0}")]
    InvalidPage(u32),

    /// A page selection with an empty rule list cannot be resolved.
    #[error("page selection has no rules")]
    EmptyRules,

    /// A range rule with `start > end`.
    #[error("range rule is inverted: {start}-{end}")]
    InvertedRange { start: u32, end: u32 },

    /// A rectangle with a negative width or height.
    #[error("rectangle '{id}' has negative dimensions ({width} x {height})")]
    NegativeDimensions { id: String, width: f64, height: f64 },

    /// A rectangle below the minimum drawing size.
    #[error("rectangle '{id}' ({width} x {height}) is below the minimum drawing size")]
    RectangleTooSmall { id: String, width: f64, height: f64 },

    /// An annotation entry with an empty rectangle list.
    #[error("page {0} has an annotation entry with no rectangles")]
    EmptyAnnotationEntry(u32),

    /// More than one annotation entry for the same page.
    #[error("page {0} has more than one annotation entry")]
    DuplicatePageEntry(u32),

    /// Two rectangles on the same page sharing an id.
    #[error("rectangle id '{id}' appears more than once on page {page}")]
    DuplicateRectangleId { page: u32, id: String },
}

impl RuleError {
    /// Whether this error describes an unresolvable rule set (configuration)
    /// rather than rejected input (validation).
    pub fn is_configuration(&self) -> bool {
        matches!(self, RuleError::EmptyRules)
    }
}
