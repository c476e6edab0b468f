//! Processing rule types
//!
//! The persisted rule aggregate for a slicer: per-page rectangle annotations
//! plus the page-selection strategy and rules. Field names and shapes are the
//! storage contract; evolution is additive-only (unknown fields are ignored
//! on read, new fields must be optional).

use serde::{Deserialize, Serialize};

/// Minimum width and height (in canonical page units) for a drawn rectangle.
/// Anything smaller is considered an accidental drag and is never persisted.
pub const MIN_RECTANGLE_SIZE: f64 = 10.0;

/// An axis-aligned annotation rectangle in scale-1.0 page space
///
/// Only the identity and the four geometric fields are semantic.
/// Presentation concerns (stroke, lock flags, colors) live client-side and
/// are not part of the persisted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Unique identifier within its page
    pub id: String,
    /// Distance from the left page edge
    pub left: f64,
    /// Distance from the top page edge
    pub top: f64,
    /// Width, non-negative
    pub width: f64,
    /// Height, non-negative
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle
    pub fn new(id: &str, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (inclusive bound)
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (inclusive bound)
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether a point lies within this rectangle, inclusive on all four edges
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Whether both dimensions are non-negative
    pub fn has_valid_dimensions(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Whether the rectangle meets the minimum drawing size
    pub fn meets_minimum_size(&self) -> bool {
        self.width >= MIN_RECTANGLE_SIZE && self.height >= MIN_RECTANGLE_SIZE
    }
}

/// The rectangles drawn on a single page
///
/// Invariant: `rectangles` is never empty while the entry exists, and at most
/// one entry exists per page number within an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnnotation {
    /// Page number, 1-based
    pub page: u32,
    /// Rectangles on the page, in drawing order
    pub rectangles: Vec<Rectangle>,
}

/// Whether the selected pages are included or excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    Include,
    Exclude,
}

impl SelectionStrategy {
    /// The opposite strategy
    pub fn flipped(self) -> Self {
        match self {
            SelectionStrategy::Include => SelectionStrategy::Exclude,
            SelectionStrategy::Exclude => SelectionStrategy::Include,
        }
    }
}

/// A single page-selection rule
///
/// Matched structurally everywhere; the set of shapes is closed. An
/// unrecognized `type` tag fails deserialization rather than being coerced
/// into a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageSelectionRule {
    /// Every page of the document
    All,
    /// The inclusive page interval `[start, end]`
    Range { start: u32, end: u32 },
    /// An explicit list of pages
    Specific { pages: Vec<u32> },
}

/// Page-selection strategy plus its rule list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSelection {
    pub strategy: SelectionStrategy,
    pub rules: Vec<PageSelectionRule>,
}

impl Default for PageSelection {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::All],
        }
    }
}

/// The full processing-rules aggregate persisted per slicer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingRules {
    /// Per-page rectangle annotations
    #[serde(default)]
    pub annotations: Vec<PageAnnotation>,
    /// Page-selection strategy and rules
    #[serde(rename = "pageSelection", default)]
    pub page_selection: PageSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aggregate_shape() {
        let rules = ProcessingRules::default();
        assert!(rules.annotations.is_empty());
        assert_eq!(rules.page_selection.strategy, SelectionStrategy::Include);
        assert_eq!(rules.page_selection.rules, vec![PageSelectionRule::All]);
    }

    #[test]
    fn test_rule_tag_serialization() {
        let json = serde_json::to_string(&PageSelectionRule::All).unwrap();
        assert_eq!(json, r#"{"type":"all"}"#);

        let json = serde_json::to_string(&PageSelectionRule::Specific { pages: vec![1, 3] }).unwrap();
        assert_eq!(json, r#"{"type":"specific","pages":[1,3]}"#);

        let json = serde_json::to_string(&PageSelectionRule::Range { start: 2, end: 5 }).unwrap();
        assert_eq!(json, r#"{"type":"range","start":2,"end":5}"#);
    }

    #[test]
    fn test_unrecognized_rule_tag_fails() {
        let result: Result<PageSelectionRule, _> = serde_json::from_str(r#"{"type":"odd"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_deep_equality() {
        let mut rules = ProcessingRules::default();
        rules.page_selection = PageSelection {
            strategy: SelectionStrategy::Exclude,
            rules: vec![PageSelectionRule::Specific { pages: vec![4, 7] }],
        };
        rules.annotations.push(PageAnnotation {
            page: 2,
            rectangles: vec![Rectangle::new("r1", 10.5, 20.0, 50.0, 25.0)],
        });

        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains("pageSelection"));
        assert!(json.contains(r#""strategy":"exclude""#));

        let parsed: ProcessingRules = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rules);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Presentation flags from older clients must not break stored configs.
        let json = r##"{
            "annotations": [{
                "page": 1,
                "rectangles": [{"id": "r1", "left": 0, "top": 0, "width": 20, "height": 20, "stroke": "#000"}]
            }],
            "pageSelection": {"strategy": "include", "rules": [{"type": "all"}]}
        }"##;
        let parsed: ProcessingRules = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.annotations[0].rectangles[0].id, "r1");
    }

    #[test]
    fn test_rectangle_contains_is_inclusive() {
        let rect = Rectangle::new("r1", 10.0, 10.0, 50.0, 20.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(60.0, 30.0));
        assert!(rect.contains(35.0, 20.0));
        assert!(!rect.contains(9.9, 20.0));
        assert!(!rect.contains(60.1, 20.0));
        assert!(!rect.contains(35.0, 30.1));
    }

    #[test]
    fn test_minimum_size() {
        assert!(Rectangle::new("r1", 0.0, 0.0, 10.0, 10.0).meets_minimum_size());
        assert!(!Rectangle::new("r2", 0.0, 0.0, 9.9, 50.0).meets_minimum_size());
        assert!(!Rectangle::new("r3", 0.0, 0.0, 50.0, 5.0).meets_minimum_size());
    }
}
