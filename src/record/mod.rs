//! Record store: placement facts, filtering, and sources.
//!
//! This module handles:
//! - The `PlacementRecord` / `CompanyPlacement` data model
//! - Lenient deserialization of upstream rows
//! - Stable predicate filtering
//! - Loading records from memory or JSON files

pub mod filter;
pub mod schema;
pub mod source;

// Re-export main types
pub use filter::RecordFilter;
pub use schema::{CompanyPlacement, PlacementRecord};
pub use source::{log_defects, InMemorySource, JsonFileSource, RecordSource};
