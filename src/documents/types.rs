//! Document data types
//!
//! A registered document is a page count plus per-page text layers. The
//! server never parses PDFs itself; the ingesting collaborator posts text
//! layers already normalized to scale-1.0 page space.

use serde::{Deserialize, Serialize};

/// A registered document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier
    pub id: String,
    /// Display name (usually the uploaded file name)
    pub name: String,
    /// Total page count
    pub page_count: u32,
    /// Creation timestamp
    pub created_at: String,
}

/// Text layer for a single page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    /// Page number (1-indexed)
    pub page: u32,
    /// Page width in canonical units
    pub width: f64,
    /// Page height in canonical units
    pub height: f64,
    /// Positioned text fragments, in source order
    pub items: Vec<TextItem>,
}

/// A positioned text fragment on a page
///
/// `(x, y)` is the fragment's anchor point in the same scale-1.0 coordinate
/// space that annotation rectangles are captured in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    /// The text content
    pub text: String,
    /// X position (from left)
    pub x: f64,
    /// Y position (from top)
    pub y: f64,
    /// Width of the text bounding box
    pub width: f64,
    /// Height of the text bounding box
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_layer_serialization() {
        let layer = TextLayer {
            page: 1,
            width: 612.0,
            height: 792.0,
            items: vec![TextItem {
                text: "Invoice".to_string(),
                x: 72.0,
                y: 54.0,
                width: 48.0,
                height: 12.0,
            }],
        };

        let json = serde_json::to_string(&layer).unwrap();
        assert!(json.contains("\"page\":1"));
        assert!(json.contains("\"text\":\"Invoice\""));

        let parsed: TextLayer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, layer);
    }
}
