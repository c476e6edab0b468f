//! Batch extraction
//!
//! Resolves the included-page set once, then extracts each included page:
//! rectangle-bounded texts where the page has annotations, the full page
//! text otherwise. Excluded pages are never read, even when they carry
//! annotations (those stay inert so the page can be re-included later
//! without redrawing). Pages are extracted concurrently; the report is
//! assembled in ascending page order regardless of completion order.

use futures::future;
use uuid::Uuid;

use super::adapter::{full_text, text_within, TextLayerProvider};
use super::error::ExtractionError;
use super::types::{ExtractedText, ExtractionReport, PageFailure, RectangleGeometry};
use crate::rules::{ProcessingRules, Rectangle};

/// Run extraction for one document under one rule set
///
/// A failure on one page does not abort the rest of the batch; the page is
/// recorded in the report's `failures` list and every other page still
/// produces its records. Dropping the returned future abandons in-flight
/// page reads (best-effort cancellation).
pub async fn run_extraction<P: TextLayerProvider>(
    provider: &P,
    document_id: &str,
    rules: &ProcessingRules,
) -> Result<ExtractionReport, ExtractionError> {
    let total_pages = provider.page_count(document_id).await?;
    let included: Vec<u32> = rules
        .page_selection
        .included_pages(total_pages)?
        .into_iter()
        .collect();

    tracing::debug!(
        "extracting {} of {} pages from document {}",
        included.len(),
        total_pages,
        document_id
    );

    let outcomes = future::join_all(
        included
            .iter()
            .map(|&page| extract_page(provider, document_id, page, rules.rectangles_for(page))),
    )
    .await;

    let mut texts = Vec::new();
    let mut failures = Vec::new();
    for (page, outcome) in included.iter().copied().zip(outcomes) {
        match outcome {
            Ok(mut page_texts) => texts.append(&mut page_texts),
            Err(e) => {
                tracing::warn!(
                    "extraction failed for page {} of document {}: {}",
                    page,
                    document_id,
                    e
                );
                failures.push(PageFailure {
                    page_number: page,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(ExtractionReport {
        document_id: document_id.to_string(),
        total_pages,
        included_pages: included,
        texts,
        failures,
    })
}

async fn extract_page<P: TextLayerProvider>(
    provider: &P,
    document_id: &str,
    page: u32,
    rectangles: Option<&[Rectangle]>,
) -> Result<Vec<ExtractedText>, ExtractionError> {
    let layer = provider.text_layer(document_id, page).await?;

    let texts = match rectangles {
        Some(rects) => rects
            .iter()
            .map(|rect| ExtractedText {
                id: Uuid::new_v4().to_string(),
                page_number: page,
                text: text_within(&layer, rect),
                rectangle_info: Some(RectangleGeometry::from(rect)),
            })
            .collect(),
        None => vec![ExtractedText {
            id: Uuid::new_v4().to_string(),
            page_number: page,
            text: full_text(&layer),
            rectangle_info: None,
        }],
    };

    Ok(texts)
}
