//! Repository trait for record access
//!
//! The archive's record tables are a black-box, read-only store from the
//! engine's point of view. The trait abstracts over the backing database so
//! search and correlation can be exercised against any implementation.

use async_trait::async_trait;

use crate::domain::registry::CollectionDescriptor;
use crate::error::Result;

use super::entity::Record;

/// Read-only access to historical-record collections
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Rows of `collection` where any of `fields` contains `needle`
    /// (case-insensitive), at most `limit` rows
    async fn search_contains(
        &self,
        collection: &CollectionDescriptor,
        fields: &[String],
        needle: &str,
        limit: u32,
    ) -> Result<Vec<Record>>;

    /// Exact lookup by the collection's id column
    async fn fetch_by_id(
        &self,
        collection: &CollectionDescriptor,
        id: &str,
    ) -> Result<Option<Record>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify trait is object-safe
    fn _assert_object_safe(_: &dyn RecordStore) {}
}
