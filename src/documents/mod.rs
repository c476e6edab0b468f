//! Document module
//!
//! Registered documents and their per-page text layers. The server stores
//! layers posted by the ingesting collaborator; PDF parsing itself happens
//! outside this service.

mod store;
mod types;

pub use store::DocumentRepository;
pub use types::{Document, TextItem, TextLayer};
