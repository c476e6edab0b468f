//! Text-layer access and rectangle-to-text mapping
//!
//! The provider trait is the only capability the rule engine needs from a
//! PDF text layer source. Rectangle coordinates are expected in the same
//! scale-1.0 canonical space as the text layer; normalizing device-pixel
//! coordinates is the caller's job, not the adapter's.

use async_trait::async_trait;

use super::error::ExtractionError;
use crate::documents::TextLayer;
use crate::rules::Rectangle;

/// Per-page text layer access for a document
#[async_trait]
pub trait TextLayerProvider: Send + Sync {
    /// Total page count of the document
    async fn page_count(&self, document_id: &str) -> Result<u32, ExtractionError>;

    /// The text layer for a page (1-based)
    async fn text_layer(&self, document_id: &str, page: u32) -> Result<TextLayer, ExtractionError>;
}

/// Concatenate the fragments whose anchor point falls inside the rectangle
///
/// Bounds are inclusive on all four edges; fragments are joined with single
/// spaces in source order.
pub fn text_within(layer: &TextLayer, rect: &Rectangle) -> String {
    layer
        .items
        .iter()
        .filter(|item| rect.contains(item.x, item.y))
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Concatenate the full text of a page
pub fn full_text(layer: &TextLayer) -> String {
    layer
        .items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::TextItem;

    fn item(text: &str, x: f64, y: f64) -> TextItem {
        TextItem {
            text: text.to_string(),
            x,
            y,
            width: 20.0,
            height: 10.0,
        }
    }

    fn layer(items: Vec<TextItem>) -> TextLayer {
        TextLayer {
            page: 2,
            width: 612.0,
            height: 792.0,
            items,
        }
    }

    #[test]
    fn test_only_anchored_fragments_are_extracted() {
        // Rectangle {left: 10, top: 10, width: 50, height: 20} covers
        // [10, 60] x [10, 30].
        let rect = Rectangle::new("r1", 10.0, 10.0, 50.0, 20.0);
        let layer = layer(vec![
            item("inside", 15.0, 12.0),
            item("outside-x", 65.0, 12.0),
            item("outside-y", 15.0, 35.0),
            item("also-inside", 59.0, 29.0),
        ]);

        assert_eq!(text_within(&layer, &rect), "inside also-inside");
    }

    #[test]
    fn test_bounds_are_inclusive_on_all_edges() {
        let rect = Rectangle::new("r1", 10.0, 10.0, 50.0, 20.0);
        let layer = layer(vec![
            item("top-left", 10.0, 10.0),
            item("bottom-right", 60.0, 30.0),
            item("past-right", 60.1, 30.0),
        ]);

        assert_eq!(text_within(&layer, &rect), "top-left bottom-right");
    }

    #[test]
    fn test_fragments_keep_source_order() {
        let rect = Rectangle::new("r1", 0.0, 0.0, 100.0, 100.0);
        let layer = layer(vec![
            item("first", 90.0, 90.0),
            item("second", 5.0, 5.0),
        ]);

        assert_eq!(text_within(&layer, &rect), "first second");
    }

    #[test]
    fn test_full_text_joins_everything() {
        let layer = layer(vec![item("a", 0.0, 0.0), item("b", 500.0, 700.0)]);
        assert_eq!(full_text(&layer), "a b");
    }

    #[test]
    fn test_empty_matches_yield_empty_string() {
        let rect = Rectangle::new("r1", 200.0, 200.0, 50.0, 50.0);
        let layer = layer(vec![item("far", 0.0, 0.0)]);
        assert_eq!(text_within(&layer, &rect), "");
    }
}
