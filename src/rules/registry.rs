//! Annotation registry operations
//!
//! Add/remove/clear operations over the aggregate's per-page rectangle
//! lists. The registry maintains two invariants: no annotation entry exists
//! with an empty rectangle list, and rectangle ids are unique within a page.

use super::error::RuleError;
use super::types::{PageAnnotation, ProcessingRules, Rectangle};

impl ProcessingRules {
    /// Add a rectangle to a page, creating the page entry on demand
    ///
    /// Inserting a rectangle whose id already exists on the page replaces the
    /// existing rectangle at the same position rather than duplicating it.
    pub fn add_rectangle(&mut self, page: u32, rect: Rectangle) -> Result<(), RuleError> {
        if page == 0 {
            return Err(RuleError::InvalidPage(page));
        }
        if !rect.has_valid_dimensions() {
            return Err(RuleError::NegativeDimensions {
                id: rect.id.clone(),
                width: rect.width,
                height: rect.height,
            });
        }
        if !rect.meets_minimum_size() {
            return Err(RuleError::RectangleTooSmall {
                id: rect.id.clone(),
                width: rect.width,
                height: rect.height,
            });
        }

        match self.annotations.iter().position(|a| a.page == page) {
            Some(entry_idx) => {
                let entry = &mut self.annotations[entry_idx];
                match entry.rectangles.iter().position(|r| r.id == rect.id) {
                    Some(idx) => entry.rectangles[idx] = rect,
                    None => entry.rectangles.push(rect),
                }
            }
            None => self.annotations.push(PageAnnotation {
                page,
                rectangles: vec![rect],
            }),
        }
        Ok(())
    }

    /// Remove a rectangle by id; returns whether anything was removed
    ///
    /// Removing the last rectangle on a page deletes the whole page entry.
    /// A nonexistent `(page, rect_id)` pair is a no-op.
    pub fn remove_rectangle(&mut self, page: u32, rect_id: &str) -> bool {
        let entry_idx = match self.annotations.iter().position(|a| a.page == page) {
            Some(idx) => idx,
            None => return false,
        };

        let entry = &mut self.annotations[entry_idx];
        let rect_idx = match entry.rectangles.iter().position(|r| r.id == rect_id) {
            Some(idx) => idx,
            None => return false,
        };

        entry.rectangles.remove(rect_idx);
        if entry.rectangles.is_empty() {
            self.annotations.remove(entry_idx);
        }
        true
    }

    /// Remove the whole annotation entry for a page, if any
    pub fn clear_page(&mut self, page: u32) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.page != page);
        self.annotations.len() != before
    }

    /// Remove all annotations
    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    /// The rectangles drawn on a page, if any
    pub fn rectangles_for(&self, page: u32) -> Option<&[Rectangle]> {
        self.annotations
            .iter()
            .find(|a| a.page == page)
            .map(|a| a.rectangles.as_slice())
    }

    /// Validate a full aggregate, e.g. one submitted for an explicit save
    pub fn validate(&self) -> Result<(), RuleError> {
        self.page_selection.validate()?;

        for entry in &self.annotations {
            if entry.page == 0 {
                return Err(RuleError::InvalidPage(0));
            }
            if entry.rectangles.is_empty() {
                return Err(RuleError::EmptyAnnotationEntry(entry.page));
            }
            if self.annotations.iter().filter(|a| a.page == entry.page).count() > 1 {
                return Err(RuleError::DuplicatePageEntry(entry.page));
            }
            for rect in &entry.rectangles {
                if !rect.has_valid_dimensions() {
                    return Err(RuleError::NegativeDimensions {
                        id: rect.id.clone(),
                        width: rect.width,
                        height: rect.height,
                    });
                }
                if !rect.meets_minimum_size() {
                    return Err(RuleError::RectangleTooSmall {
                        id: rect.id.clone(),
                        width: rect.width,
                        height: rect.height,
                    });
                }
                if entry.rectangles.iter().filter(|r| r.id == rect.id).count() > 1 {
                    return Err(RuleError::DuplicateRectangleId {
                        page: entry.page,
                        id: rect.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: &str) -> Rectangle {
        Rectangle::new(id, 10.0, 10.0, 50.0, 20.0)
    }

    #[test]
    fn test_add_creates_page_entry() {
        let mut rules = ProcessingRules::default();
        rules.add_rectangle(2, rect("r1")).unwrap();

        assert_eq!(rules.annotations.len(), 1);
        assert_eq!(rules.annotations[0].page, 2);
        assert_eq!(rules.rectangles_for(2).unwrap().len(), 1);
        assert!(rules.rectangles_for(1).is_none());
    }

    #[test]
    fn test_duplicate_id_is_an_upsert() {
        let mut rules = ProcessingRules::default();
        rules.add_rectangle(1, rect("r1")).unwrap();
        rules.add_rectangle(1, rect("r2")).unwrap();

        let replacement = Rectangle::new("r1", 99.0, 99.0, 40.0, 40.0);
        rules.add_rectangle(1, replacement.clone()).unwrap();

        let rects = rules.rectangles_for(1).unwrap();
        assert_eq!(rects.len(), 2);
        // Replaced in place, not re-appended.
        assert_eq!(rects[0], replacement);
        assert_eq!(rects[1].id, "r2");
    }

    #[test]
    fn test_add_rejects_bad_rectangles() {
        let mut rules = ProcessingRules::default();

        let err = rules
            .add_rectangle(1, Rectangle::new("r1", 0.0, 0.0, -5.0, 20.0))
            .unwrap_err();
        assert!(matches!(err, RuleError::NegativeDimensions { .. }));

        let err = rules
            .add_rectangle(1, Rectangle::new("r1", 0.0, 0.0, 9.0, 9.0))
            .unwrap_err();
        assert!(matches!(err, RuleError::RectangleTooSmall { .. }));

        let err = rules.add_rectangle(0, rect("r1")).unwrap_err();
        assert_eq!(err, RuleError::InvalidPage(0));

        // Rejected mutations leave the aggregate untouched.
        assert!(rules.annotations.is_empty());
    }

    #[test]
    fn test_removing_last_rectangle_drops_the_entry() {
        let mut rules = ProcessingRules::default();
        rules.add_rectangle(3, rect("r1")).unwrap();
        rules.add_rectangle(3, rect("r2")).unwrap();

        assert!(rules.remove_rectangle(3, "r1"));
        assert_eq!(rules.rectangles_for(3).unwrap().len(), 1);

        assert!(rules.remove_rectangle(3, "r2"));
        assert!(rules.annotations.is_empty());
        assert!(!rules.annotations.iter().any(|a| a.rectangles.is_empty()));
    }

    #[test]
    fn test_remove_nonexistent_is_a_no_op() {
        let mut rules = ProcessingRules::default();
        rules.add_rectangle(1, rect("r1")).unwrap();

        assert!(!rules.remove_rectangle(1, "missing"));
        assert!(!rules.remove_rectangle(9, "r1"));
        assert_eq!(rules.rectangles_for(1).unwrap().len(), 1);
    }

    #[test]
    fn test_clear_page_and_clear_all() {
        let mut rules = ProcessingRules::default();
        rules.add_rectangle(1, rect("r1")).unwrap();
        rules.add_rectangle(2, rect("r2")).unwrap();

        assert!(rules.clear_page(1));
        assert!(!rules.clear_page(1));
        assert_eq!(rules.annotations.len(), 1);

        rules.clear_annotations();
        assert!(rules.annotations.is_empty());
    }

    #[test]
    fn test_validate_rejects_broken_aggregates() {
        let mut rules = ProcessingRules::default();
        rules.annotations.push(PageAnnotation {
            page: 2,
            rectangles: vec![],
        });
        assert_eq!(rules.validate(), Err(RuleError::EmptyAnnotationEntry(2)));

        let mut rules = ProcessingRules::default();
        rules.annotations.push(PageAnnotation {
            page: 2,
            rectangles: vec![rect("r1"), rect("r1")],
        });
        assert!(matches!(
            rules.validate(),
            Err(RuleError::DuplicateRectangleId { page: 2, .. })
        ));

        let mut rules = ProcessingRules::default();
        rules.add_rectangle(2, rect("r1")).unwrap();
        rules.add_rectangle(2, rect("r2")).unwrap();
        rules.add_rectangle(5, rect("r3")).unwrap();
        assert_eq!(rules.validate(), Ok(()));
    }
}
