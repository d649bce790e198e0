//! Shared fixtures for search and correlation tests

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Record, RecordStore, SqliteRecordStore};
use crate::domain::registry::{CollectionDescriptor, CollectionRegistry};
use crate::error::Result;
use crate::storage::Database;

const ARCHIVE: &str = r#"
    CREATE TABLE runaway_ads (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT, owner TEXT, location TEXT, age INTEGER, date TEXT
    );
    INSERT INTO runaway_ads VALUES ('ra-1', 'William Green', 'John Hart', 'Camden', 25, '1851-04-02');
    INSERT INTO runaway_ads VALUES ('ra-2', 'Sarah Johnson', 'Thomas Hill', 'Beaufort', 30, '1849');
    INSERT INTO runaway_ads VALUES ('ra-3', 'William Green', 'Amos Lee', 'Savannah', 22, '1855');

    CREATE TABLE census_1870 (
        id TEXT PRIMARY KEY NOT NULL,
        first_name TEXT, last_name TEXT, age INTEGER, location TEXT, state TEXT, year INTEGER
    );
    INSERT INTO census_1870 VALUES ('c-1', 'William', 'Johnson', 40, 'Camden County', 'SC', 1870);
    INSERT INTO census_1870 VALUES ('c-2', 'Sarah', 'Johnson', 51, 'Beaufort', 'SC', 1870);
    INSERT INTO census_1870 VALUES ('c-3', 'Willa', 'Brooks', 19, 'Orangeburg', 'SC', 1870);

    CREATE TABLE slave_manifests (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT, owner_name TEXT, port TEXT, age INTEGER, date TEXT
    );
    INSERT INTO slave_manifests VALUES ('m-1', 'Sarah', 'Thomas Hill', 'Charleston', 11, '1850-05-01');
    INSERT INTO slave_manifests VALUES ('m-2', 'Ned', 'John Hart', 'Savannah', 9, '1852');
"#;

pub fn archive_descriptors() -> Vec<CollectionDescriptor> {
    vec![
        CollectionDescriptor::new("runaway_ads", "Runaway Slave Advertisements", "runaway-ads")
            .with_columns(&["id", "name", "owner", "location", "age", "date"])
            .with_searchable(&["name", "owner", "location"])
            .with_identifier(&["name"]),
        CollectionDescriptor::new("census_1870", "1870 Census", "census-1870")
            .with_columns(&["id", "first_name", "last_name", "age", "location", "state", "year"])
            .with_searchable(&["first_name", "last_name", "location"])
            .with_identifier(&["first_name", "last_name"]),
        CollectionDescriptor::new("slave_manifests", "Slave Manifests", "slave-manifests")
            .with_columns(&["id", "name", "owner_name", "port", "age", "date"])
            .with_searchable(&["name", "owner_name", "port"])
            .with_identifier(&["name"]),
    ]
}

fn all_slugs(descriptors: &[CollectionDescriptor]) -> Vec<String> {
    descriptors.iter().map(|d| d.slug.clone()).collect()
}

/// Registry over the seeded archive tables, all cross-referenced
pub fn archive_registry() -> Arc<CollectionRegistry> {
    let descriptors = archive_descriptors();
    let slugs = all_slugs(&descriptors);
    Arc::new(CollectionRegistry::new(descriptors, &slugs).unwrap())
}

/// Archive registry plus one collection whose table was never loaded
pub fn archive_registry_with_missing_table() -> Arc<CollectionRegistry> {
    let mut descriptors = archive_descriptors();
    descriptors.insert(
        1,
        CollectionDescriptor::new("lost_ledgers", "Lost Ledgers", "lost-ledgers")
            .with_columns(&["id", "name"])
            .with_searchable(&["name"])
            .with_identifier(&["name"]),
    );
    let slugs = all_slugs(&descriptors);
    Arc::new(CollectionRegistry::new(descriptors, &slugs).unwrap())
}

/// Migrated in-memory database with the archive tables seeded
pub async fn archive_database() -> Database {
    let db = Database::in_memory()
        .await
        .expect("Failed to create test database");
    seed_archive(db.pool()).await;
    db
}

pub async fn seed_archive(pool: &SqlitePool) {
    sqlx::raw_sql(ARCHIVE)
        .execute(pool)
        .await
        .expect("Failed to seed archive");
}

pub fn archive_store(db: &Database) -> Arc<SqliteRecordStore> {
    Arc::new(SqliteRecordStore::new(db.pool().clone()))
}

/// Store wrapper that counts every call
pub struct CountingStore {
    inner: Arc<dyn RecordStore>,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn RecordStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn search_contains(
        &self,
        collection: &CollectionDescriptor,
        fields: &[String],
        needle: &str,
        limit: u32,
    ) -> Result<Vec<Record>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .search_contains(collection, fields, needle, limit)
            .await
    }

    async fn fetch_by_id(
        &self,
        collection: &CollectionDescriptor,
        id: &str,
    ) -> Result<Option<Record>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_by_id(collection, id).await
    }
}

/// Store wrapper that stalls searches of one collection
pub struct SlowStore {
    inner: Arc<dyn RecordStore>,
    slow_collection: String,
    delay: Duration,
}

impl SlowStore {
    pub fn new(inner: Arc<dyn RecordStore>, slow_collection: &str, delay: Duration) -> Self {
        Self {
            inner,
            slow_collection: slow_collection.to_string(),
            delay,
        }
    }
}

#[async_trait]
impl RecordStore for SlowStore {
    async fn search_contains(
        &self,
        collection: &CollectionDescriptor,
        fields: &[String],
        needle: &str,
        limit: u32,
    ) -> Result<Vec<Record>> {
        if collection.id == self.slow_collection {
            tokio::time::sleep(self.delay).await;
        }
        self.inner
            .search_contains(collection, fields, needle, limit)
            .await
    }

    async fn fetch_by_id(
        &self,
        collection: &CollectionDescriptor,
        id: &str,
    ) -> Result<Option<Record>> {
        self.inner.fetch_by_id(collection, id).await
    }
}
