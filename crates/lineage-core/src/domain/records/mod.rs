//! Historical records
//!
//! Raw rows from the archive's record tables, the normalized attributes the
//! scorer and correlation engine work from, and the read-only store both
//! search paths query.

mod attributes;
mod entity;
mod repository;
mod repository_trait;

#[cfg(test)]
pub(crate) mod test_support;

pub use attributes::ExtractedAttributes;
pub use entity::{Record, extract_year, value_text};
pub use repository::SqliteRecordStore;
pub use repository_trait::RecordStore;
