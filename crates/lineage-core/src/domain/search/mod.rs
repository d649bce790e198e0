//! Search fan-out engine
//!
//! Runs a case-insensitive substring query against every registered
//! collection concurrently, then merges and ranks the rows.
//!
//! # Example
//!
//! ```ignore
//! use lineage_core::domain::search::{FanOutSearch, SearchRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let search = FanOutSearch::new(store, registry, config.search.clone());
//! let response = search
//!     .search(&SearchRequest::new("wil").with_suggestions(), &CancellationToken::new())
//!     .await?;
//! for result in &response.results {
//!     println!("{} ({})", result.identifier, result.collection.display_name);
//! }
//! ```

pub mod entity;
pub(crate) mod fanout;
pub mod ranking;
pub mod service;

pub use entity::{
    CollectionError, MAX_SUGGESTIONS, MIN_QUERY_CHARS, QUERY_TOO_SHORT, SearchRequest,
    SearchResponse, SearchResult,
};
pub use service::FanOutSearch;
