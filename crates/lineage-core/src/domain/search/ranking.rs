//! Identifier, snippet and result ordering
//!
//! Ranking has no numeric score: an identifier equal to the query comes
//! first, then identifiers starting with it, then everything else in the
//! order it was gathered.

use crate::domain::records::Record;
use crate::domain::registry::CollectionDescriptor;

use super::entity::SearchResult;

/// Non-empty identifier-field values joined by " - "
pub fn identifier(record: &Record, collection: &CollectionDescriptor) -> String {
    collection
        .identifier_fields
        .iter()
        .filter_map(|field| record.text(field))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Value of the first searchable field containing `query`, or empty
pub fn snippet(record: &Record, collection: &CollectionDescriptor, query: &str) -> String {
    let needle = query.to_lowercase();
    collection
        .searchable_fields
        .iter()
        .filter_map(|field| record.text(field))
        .find(|value| value.to_lowercase().contains(&needle))
        .unwrap_or_default()
}

fn tier(identifier: &str, needle: &str) -> u8 {
    let identifier = identifier.to_lowercase();
    if identifier == needle {
        0
    } else if identifier.starts_with(needle) {
        1
    } else {
        2
    }
}

/// Stable sort: exact identifier match, prefix match, original order
pub fn rank(results: &mut [SearchResult], query: &str) {
    let needle = query.trim().to_lowercase();
    results.sort_by_cached_key(|result| tier(&result.identifier, &needle));
}
