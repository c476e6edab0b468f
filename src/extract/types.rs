//! Extraction data types

use serde::{Deserialize, Serialize};

use crate::rules::Rectangle;

/// Geometry of the rectangle a text was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&Rectangle> for RectangleGeometry {
    fn from(rect: &Rectangle) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// One extracted text record
///
/// `rectangle_info = null` signals a full-page extraction rather than a
/// rectangle-bounded one. Records are produced fresh by each run and never
/// mutated afterward. Field names are the storage contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub id: String,
    pub page_number: u32,
    pub text: String,
    pub rectangle_info: Option<RectangleGeometry>,
}

/// A page the batch could not extract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFailure {
    pub page_number: u32,
    pub error: String,
}

/// The result of one extraction run
///
/// `texts` is ordered by ascending page number regardless of per-page
/// completion order; pages that failed appear in `failures` instead and do
/// not abort the rest of the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub document_id: String,
    pub total_pages: u32,
    pub included_pages: Vec<u32>,
    pub texts: Vec<ExtractedText>,
    pub failures: Vec<PageFailure>,
}
