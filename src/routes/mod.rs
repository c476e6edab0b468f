//! HTTP route modules

pub mod documents;
pub mod extract;
pub mod health;
pub mod slicers;
