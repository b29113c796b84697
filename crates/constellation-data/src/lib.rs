//! Attribute records delivered by the external data source.
//!
//! This crate contains pure data structures with no layout logic. The engine
//! and the viewer both depend on it.

pub mod record;
pub mod source;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export record types
pub use record::{AttributeValue, DataPayload, UnitRecord};

// Re-export source types
pub use source::{FileSource, RecordSource, SourceError, StaticSource};
