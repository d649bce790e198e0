//! SQLite stores for admin links and matching settings

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use super::entity::{AdminLink, RecordRef, RelationshipType};
use super::repository_trait::{LinkStore, SettingsStore};
use super::settings::{MatchSettings, SETTINGS_KEY};
use crate::error::{Error, Result};

/// Link store over the `record_links` table
#[derive(Debug, Clone)]
pub struct SqliteLinkStore {
    pool: SqlitePool,
}

impl SqliteLinkStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for SqliteLinkStore {
    async fn links_for(&self, record_id: &str) -> Result<Vec<AdminLink>> {
        let rows: Vec<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, source_id, source_collection, source_name,
                   target_id, target_collection, target_name,
                   bidirectional, relationship_type, note, featured, priority, custom_badge,
                   created_at
            FROM record_links
            WHERE source_id = ? OR target_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(record_id)
        .bind(record_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::DatabaseError)?;

        Ok(rows.into_iter().map(LinkRow::into_link).collect())
    }
}

/// Settings store over the `site_settings` key/value table
#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn load(&self) -> Result<(MatchSettings, bool)> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM site_settings WHERE key = ?")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        match row {
            Some((blob,)) => Ok((serde_json::from_str(&blob)?, true)),
            None => Ok((MatchSettings::defaults(), false)),
        }
    }

    async fn save(&self, settings: &MatchSettings) -> Result<()> {
        let blob = serde_json::to_string(settings)?;

        sqlx::query(
            r#"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(&blob)
        .execute(&self.pool)
        .await
        .map_err(Error::DatabaseError)?;

        Ok(())
    }

    async fn reset(&self) -> Result<bool> {
        let result = sqlx::query("DELETE FROM site_settings WHERE key = ?")
            .bind(SETTINGS_KEY)
            .execute(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        Ok(result.rows_affected() > 0)
    }
}

// ========== Database Row Types ==========

#[derive(Debug, FromRow)]
struct LinkRow {
    id: String,
    source_id: String,
    source_collection: String,
    source_name: Option<String>,
    target_id: String,
    target_collection: String,
    target_name: Option<String>,
    bidirectional: bool,
    relationship_type: String,
    note: Option<String>,
    featured: bool,
    priority: i32,
    custom_badge: Option<String>,
    created_at: NaiveDateTime,
}

impl LinkRow {
    fn into_link(self) -> AdminLink {
        let relationship_type =
            RelationshipType::parse(&self.relationship_type).unwrap_or(RelationshipType::Custom);

        AdminLink {
            id: self.id,
            source: RecordRef {
                id: self.source_id,
                collection: self.source_collection,
                name: self.source_name,
            },
            target: RecordRef {
                id: self.target_id,
                collection: self.target_collection,
                name: self.target_name,
            },
            bidirectional: self.bidirectional,
            relationship_type,
            note: self.note,
            featured: self.featured,
            priority: self.priority,
            custom_badge: self.custom_badge,
            created_at: self.created_at.and_utc(),
        }
    }
}
