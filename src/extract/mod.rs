//! Extraction module
//!
//! Turns a processing-rules aggregate and a document's text layers into
//! `ExtractedText` records: rectangle-bounded text for annotated pages,
//! full-page text for unannotated included pages, nothing at all for
//! excluded pages.

mod adapter;
mod error;
mod job;
mod store;
mod types;

pub use adapter::{full_text, text_within, TextLayerProvider};
pub use error::ExtractionError;
pub use job::run_extraction;
pub use store::{ExtractionRun, ExtractionRunRepository};
pub use types::{ExtractedText, ExtractionReport, PageFailure, RectangleGeometry};
