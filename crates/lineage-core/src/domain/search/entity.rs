//! Search request and response types

use serde::{Deserialize, Serialize};

use crate::domain::records::Record;
use crate::domain::registry::CollectionRef;

/// Queries shorter than this (in characters, after trimming) are not run
pub const MIN_QUERY_CHARS: usize = 2;

/// Autocomplete suggestions collected per search
pub const MAX_SUGGESTIONS: usize = 10;

pub const QUERY_TOO_SHORT: &str = "Query too short";

/// A fan-out search across every registered collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Defaults to the configured limit and is clamped to the configured maximum
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub suggest: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_suggestions(mut self) -> Self {
        self.suggest = true;
        self
    }
}

/// One matching row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub collection: CollectionRef,
    pub fields: Record,
    /// Identifier-field values joined by " - "
    pub identifier: String,
    /// First searchable value containing the query
    pub snippet: String,
}

/// A collection that could not be searched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionError {
    pub collection: String,
    pub slug: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub suggestions: Vec<String>,
    pub total: usize,
    pub query: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<CollectionError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    /// Successful empty response for a query below [`MIN_QUERY_CHARS`]
    pub fn too_short(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            message: Some(QUERY_TOO_SHORT.to_string()),
            ..Default::default()
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}
