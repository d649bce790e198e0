//! Record correlation
//!
//! Produces the "related records" list shown beside a record: links an
//! administrator curated by hand, followed by heuristic matches from other
//! collections that share a name, place, enslaver or period with it.
//!
//! # Architecture
//!
//! - **Entities**: `AdminLink`, `RelatedRecordCandidate`, `SearchTerms`
//! - **Settings**: `MatchSettings`, the admin toggles for the heuristics
//! - **Repositories**: `LinkStore` / `SettingsStore` traits with SQLite
//!   implementations
//! - **Service**: `CorrelationEngine`
//!
//! # Example
//!
//! ```ignore
//! use lineage_core::domain::correlation::{CorrelationEngine, SearchTerms};
//!
//! let related = engine
//!     .related_records("ra-2", "runaway_ads", &SearchTerms::default(), 10)
//!     .await?;
//! for candidate in related {
//!     println!("{} ({}): {}", candidate.name, candidate.origin, candidate.detail);
//! }
//! ```

pub mod entity;
pub mod heuristics;
pub mod repository;
pub mod repository_trait;
pub mod service;
pub mod settings;

pub use entity::{
    AdminLink, MatchOrigin, RecordRef, RelatedRecordCandidate, RelationshipType, SearchTerms,
};
pub use heuristics::{MatchPass, ROWS_PER_QUERY};
pub use repository::{SqliteLinkStore, SqliteSettingsStore};
pub use repository_trait::{LinkStore, SettingsStore};
pub use service::{Correlation, CorrelationEngine};
pub use settings::{MatchSettings, SETTINGS_KEY};
