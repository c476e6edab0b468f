//! Page selection resolution and toggling
//!
//! `included_pages` expands a strategy + rule list into the concrete set of
//! 1-based page numbers to process. `toggle_page` is the interactive
//! mutation protocol: it keeps the representation canonical, collapsing back
//! to a single `all` rule whenever the selection is fully reverted.

use std::collections::BTreeSet;

use super::error::RuleError;
use super::types::{PageSelection, PageSelectionRule, SelectionStrategy};

impl PageSelection {
    /// Check the rule list for shapes that cannot be resolved
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.rules.is_empty() {
            return Err(RuleError::EmptyRules);
        }
        for rule in &self.rules {
            match rule {
                PageSelectionRule::All => {}
                PageSelectionRule::Range { start, end } => {
                    if *start == 0 {
                        return Err(RuleError::InvalidPage(0));
                    }
                    if start > end {
                        return Err(RuleError::InvertedRange {
                            start: *start,
                            end: *end,
                        });
                    }
                }
                PageSelectionRule::Specific { pages } => {
                    if pages.iter().any(|p| *p == 0) {
                        return Err(RuleError::InvalidPage(0));
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve the set of included pages for a document of `total_pages`
    ///
    /// Pages named by `specific` or `range` rules that fall beyond
    /// `total_pages` are filtered out; they stay in the stored rule set and
    /// become effective again if the document grows.
    pub fn included_pages(&self, total_pages: u32) -> Result<BTreeSet<u32>, RuleError> {
        self.validate()?;

        if total_pages == 0 {
            return Ok(BTreeSet::new());
        }

        let mut selected = BTreeSet::new();
        for rule in &self.rules {
            match rule {
                PageSelectionRule::All => selected.extend(1..=total_pages),
                PageSelectionRule::Range { start, end } => {
                    selected.extend(*start..=(*end).min(total_pages));
                }
                PageSelectionRule::Specific { pages } => {
                    selected.extend(pages.iter().copied().filter(|p| *p <= total_pages));
                }
            }
        }

        match self.strategy {
            SelectionStrategy::Include => Ok(selected),
            SelectionStrategy::Exclude => {
                Ok((1..=total_pages).filter(|p| !selected.contains(p)).collect())
            }
        }
    }

    /// Toggle a single page's inclusion
    ///
    /// From the canonical `[all]` form this synthesizes a `specific` rule for
    /// the toggled page and flips the strategy: flipping one page out of a
    /// uniform set is most compactly "the opposite strategy, this one page".
    /// Toggling the last remaining specific page inverts that step, so a
    /// double toggle is always the identity and the representation never
    /// grows unboundedly.
    pub fn toggle_page(&mut self, page: u32) -> Result<(), RuleError> {
        if page == 0 {
            return Err(RuleError::InvalidPage(page));
        }

        if matches!(self.rules.as_slice(), [PageSelectionRule::All]) {
            self.rules = vec![PageSelectionRule::Specific { pages: vec![page] }];
            self.strategy = self.strategy.flipped();
            return Ok(());
        }

        let specific_idx = self
            .rules
            .iter()
            .position(|r| matches!(r, PageSelectionRule::Specific { .. }));

        match specific_idx {
            Some(idx) => {
                let mut emptied = false;
                if let PageSelectionRule::Specific { pages } = &mut self.rules[idx] {
                    match pages.iter().position(|p| *p == page) {
                        Some(at) => {
                            pages.remove(at);
                        }
                        None => pages.push(page),
                    }
                    emptied = pages.is_empty();
                }
                if emptied {
                    self.rules = vec![PageSelectionRule::All];
                    self.strategy = self.strategy.flipped();
                }
                Ok(())
            }
            None => {
                // Unexpected shape (e.g. a lone range rule): reset to a
                // specific selection at the current strategy.
                self.rules = vec![PageSelectionRule::Specific { pages: vec![page] }];
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(selection: &PageSelection, total: u32) -> Vec<u32> {
        selection.included_pages(total).unwrap().into_iter().collect()
    }

    #[test]
    fn test_include_all() {
        let selection = PageSelection::default();
        assert_eq!(pages(&selection, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(pages(&selection, 1), vec![1]);
    }

    #[test]
    fn test_exclude_all_is_empty() {
        let selection = PageSelection {
            strategy: SelectionStrategy::Exclude,
            rules: vec![PageSelectionRule::All],
        };
        assert!(pages(&selection, 5).is_empty());
    }

    #[test]
    fn test_specific_include_and_exclude() {
        let mut selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::Specific { pages: vec![2, 4] }],
        };
        assert_eq!(pages(&selection, 5), vec![2, 4]);

        selection.strategy = SelectionStrategy::Exclude;
        assert_eq!(pages(&selection, 5), vec![1, 3, 5]);
    }

    #[test]
    fn test_range_rules_are_wired() {
        let mut selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::Range { start: 2, end: 4 }],
        };
        assert_eq!(pages(&selection, 5), vec![2, 3, 4]);

        selection.strategy = SelectionStrategy::Exclude;
        assert_eq!(pages(&selection, 5), vec![1, 5]);
    }

    #[test]
    fn test_out_of_range_pages_are_filtered() {
        let selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::Specific { pages: vec![2, 9] }],
        };
        assert_eq!(pages(&selection, 5), vec![2]);

        let selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::Range { start: 4, end: 9 }],
        };
        assert_eq!(pages(&selection, 5), vec![4, 5]);
    }

    #[test]
    fn test_zero_total_pages_is_always_empty() {
        for strategy in [SelectionStrategy::Include, SelectionStrategy::Exclude] {
            let selection = PageSelection {
                strategy,
                rules: vec![PageSelectionRule::All],
            };
            assert!(pages(&selection, 0).is_empty());
        }
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::Specific { pages: vec![0, 2] }],
        };
        assert_eq!(selection.included_pages(5), Err(RuleError::InvalidPage(0)));
    }

    #[test]
    fn test_empty_rules_is_a_configuration_error() {
        let selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![],
        };
        let err = selection.included_pages(5).unwrap_err();
        assert_eq!(err, RuleError::EmptyRules);
        assert!(err.is_configuration());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::Range { start: 5, end: 3 }],
        };
        assert_eq!(
            selection.included_pages(9),
            Err(RuleError::InvertedRange { start: 5, end: 3 })
        );
    }

    #[test]
    fn test_toggle_from_all_flips_strategy() {
        // Scenario: 5 pages, toggle page 3 off the default include-all set.
        let mut selection = PageSelection::default();
        selection.toggle_page(3).unwrap();

        assert_eq!(selection.strategy, SelectionStrategy::Exclude);
        assert_eq!(
            selection.rules,
            vec![PageSelectionRule::Specific { pages: vec![3] }]
        );
        assert_eq!(pages(&selection, 5), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_double_toggle_restores_canonical_form() {
        let mut selection = PageSelection::default();
        selection.toggle_page(3).unwrap();
        selection.toggle_page(3).unwrap();

        assert_eq!(selection, PageSelection::default());
        assert_eq!(pages(&selection, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_double_toggle_preserves_membership() {
        let mut selection = PageSelection {
            strategy: SelectionStrategy::Exclude,
            rules: vec![PageSelectionRule::Specific { pages: vec![2, 5, 9] }],
        };
        let before = pages(&selection, 10);
        selection.toggle_page(5).unwrap();
        selection.toggle_page(5).unwrap();

        assert_eq!(selection.strategy, SelectionStrategy::Exclude);
        assert_eq!(pages(&selection, 10), before);
    }

    #[test]
    fn test_toggle_every_page_and_back_collapses() {
        let total = 7;
        let mut selection = PageSelection::default();
        for page in 1..=total {
            selection.toggle_page(page).unwrap();
        }
        // Everything toggled off: an exclude-specific over all pages.
        assert_eq!(selection.strategy, SelectionStrategy::Exclude);
        assert!(pages(&selection, total).is_empty());

        for page in 1..=total {
            selection.toggle_page(page).unwrap();
        }
        assert_eq!(selection, PageSelection::default());
    }

    #[test]
    fn test_toggle_is_commutative_across_pages() {
        let mut a = PageSelection::default();
        a.toggle_page(2).unwrap();
        a.toggle_page(4).unwrap();

        let mut b = PageSelection::default();
        b.toggle_page(4).unwrap();
        b.toggle_page(2).unwrap();

        assert_eq!(pages(&a, 6), pages(&b, 6));
    }

    #[test]
    fn test_toggle_page_zero_leaves_state_untouched() {
        let mut selection = PageSelection::default();
        assert_eq!(selection.toggle_page(0), Err(RuleError::InvalidPage(0)));
        assert_eq!(selection, PageSelection::default());
    }

    #[test]
    fn test_toggle_resets_unexpected_shapes() {
        let mut selection = PageSelection {
            strategy: SelectionStrategy::Include,
            rules: vec![PageSelectionRule::Range { start: 1, end: 3 }],
        };
        selection.toggle_page(2).unwrap();

        assert_eq!(selection.strategy, SelectionStrategy::Include);
        assert_eq!(
            selection.rules,
            vec![PageSelectionRule::Specific { pages: vec![2] }]
        );
    }
}
