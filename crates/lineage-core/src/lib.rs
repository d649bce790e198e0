//! Lineage Core Library
//!
//! This crate provides the core functionality for Lineage, including:
//! - Collection registry with per-collection field-role mapping
//! - Fan-out substring search across every historical-record collection
//! - Relevance scoring between records from unrelated collections
//! - Related-record correlation (admin-curated links + heuristics)
//! - Admin matching configuration
//! - Storage (SQLite) and the HTTP API

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::correlation::{CorrelationEngine, MatchSettings, SearchTerms};
    pub use crate::domain::registry::CollectionRegistry;
    pub use crate::domain::search::{FanOutSearch, SearchRequest};
    pub use crate::error::{Error, Result};
}

#[cfg(test)]
mod config_tests;
