//! Processing rules engine
//!
//! The core of the server: the per-slicer aggregate combining page-selection
//! rules with per-page rectangle annotations.
//!
//! # Features
//!
//! - A small, closed rule language (`all` | `range` | `specific`) interpreted
//!   under an `include`/`exclude` strategy
//! - The interactive toggle protocol that keeps the rule representation
//!   canonical (double toggle is the identity)
//! - An annotation registry that never leaves empty page entries behind and
//!   upserts rectangles by id
//! - SQLite persistence with the aggregate stored as opaque JSON

mod error;
mod registry;
mod selection;
mod store;
mod types;

pub use error::RuleError;
pub use store::{Slicer, SlicerRepository};
pub use types::{
    PageAnnotation, PageSelection, PageSelectionRule, ProcessingRules, Rectangle,
    SelectionStrategy, MIN_RECTANGLE_SIZE,
};
