//! Repository traits for correlation inputs
//!
//! Admin links and matching settings are authored elsewhere; the engine
//! only reads them. `save`/`reset` exist for the CLI.

use async_trait::async_trait;

use super::entity::AdminLink;
use super::settings::MatchSettings;
use crate::error::Result;

/// Admin-curated links touching a record
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Links where `record_id` is the source or the target
    async fn links_for(&self, record_id: &str) -> Result<Vec<AdminLink>>;
}

/// Stored matching configuration
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored settings and whether an explicit blob was found; defaults
    /// when nothing is stored
    async fn load(&self) -> Result<(MatchSettings, bool)>;

    async fn save(&self, settings: &MatchSettings) -> Result<()>;

    /// Remove the stored blob; returns whether one existed
    async fn reset(&self) -> Result<bool>;
}
