//! SQLite record store
//!
//! Runs case-insensitive substring predicates against the archive's record
//! tables. Column and table names come from the registry and are validated
//! as plain identifiers before being quoted into SQL; the search text is
//! always bound.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, ValueRef};

use super::entity::Record;
use super::repository_trait::RecordStore;
use crate::domain::registry::{CollectionDescriptor, validate_identifier};
use crate::error::{Error, Result};

/// Record store over the archive's SQLite database
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Escape LIKE wildcards so the needle matches literally
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Bracket-quoted identifier; unlike double quotes, SQLite never reads an
/// unknown bracketed name as a string literal
fn quoted(identifier: &str) -> Result<String> {
    validate_identifier(identifier)?;
    Ok(format!("[{}]", identifier))
}

fn decode_column(row: &SqliteRow, index: usize) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if !raw.is_null() => {}
        _ => return Value::Null,
    }
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Value::String(v);
    }
    // Blobs and anything else undecodable are not displayable
    Value::Null
}

fn row_to_record(row: &SqliteRow) -> Record {
    let mut fields = Map::new();
    for column in row.columns() {
        fields.insert(
            column.name().to_string(),
            decode_column(row, column.ordinal()),
        );
    }
    Record::new(fields)
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn search_contains(
        &self,
        collection: &CollectionDescriptor,
        fields: &[String],
        needle: &str,
        limit: u32,
    ) -> Result<Vec<Record>> {
        if fields.is_empty() {
            return Err(Error::InvalidInput(format!(
                "no fields to search in '{}'",
                collection.id
            )));
        }

        let predicates = fields
            .iter()
            .map(|field| {
                Ok(format!(
                    "LOWER(CAST({} AS TEXT)) LIKE ? ESCAPE '\\'",
                    quoted(field)?
                ))
            })
            .collect::<Result<Vec<_>>>()?
            .join(" OR ");

        let sql = format!(
            "SELECT * FROM {} WHERE {} LIMIT ?",
            quoted(&collection.table)?,
            predicates
        );

        let pattern = like_pattern(needle);
        let mut query = sqlx::query(&sql);
        for _ in fields {
            query = query.bind(&pattern);
        }
        query = query.bind(i64::from(limit));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn fetch_by_id(
        &self,
        collection: &CollectionDescriptor,
        id: &str,
    ) -> Result<Option<Record>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ? LIMIT 1",
            quoted(&collection.table)?,
            quoted(&collection.id_field)?
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        Ok(row.as_ref().map(row_to_record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use serde_json::json;

    async fn create_test_store() -> SqliteRecordStore {
        let db = Database::in_memory()
            .await
            .expect("Failed to create test database");
        let pool = db.pool().clone();

        sqlx::raw_sql(
            r#"
            CREATE TABLE runaway_ads (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT,
                owner TEXT,
                location TEXT,
                age INTEGER,
                reward REAL,
                date TEXT
            );
            INSERT INTO runaway_ads VALUES ('ra-1', 'William Green', 'John Hart', 'Camden', 25, 50.0, '1851-04-02');
            INSERT INTO runaway_ads VALUES ('ra-2', 'Sarah', 'WILLIAM PRICE', 'Beaufort', NULL, NULL, '1849');
            INSERT INTO runaway_ads VALUES ('ra-3', 'Ned 100%', 'Amos Lee', 'Savannah', 30, 20.0, '1855');
            "#,
        )
        .execute(&pool)
        .await
        .expect("Failed to seed records");

        SqliteRecordStore::new(pool)
    }

    fn ads() -> CollectionDescriptor {
        CollectionDescriptor::new("runaway_ads", "Runaway Ads", "runaway-ads")
            .with_columns(&["id", "name", "owner", "location", "age", "reward", "date"])
            .with_searchable(&["name", "owner", "location"])
            .with_identifier(&["name", "date"])
            .resolve()
            .unwrap()
    }

    #[tokio::test]
    async fn test_contains_is_case_insensitive_across_fields() {
        let store = create_test_store().await;
        let fields = ads().searchable_fields.clone();

        let rows = store
            .search_contains(&ads(), &fields, "william", 10)
            .await
            .unwrap();

        let ids: Vec<String> = rows.iter().filter_map(|r| r.text("id")).collect();
        assert_eq!(ids, vec!["ra-1".to_string(), "ra-2".to_string()]);
    }

    #[tokio::test]
    async fn test_contains_respects_limit() {
        let store = create_test_store().await;
        let fields = vec!["location".to_string()];

        let rows = store.search_contains(&ads(), &fields, "a", 2).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_wildcards_match_literally() {
        let store = create_test_store().await;
        let fields = vec!["name".to_string()];

        let rows = store.search_contains(&ads(), &fields, "100%", 10).await.unwrap();
        assert_eq!(rows.len(), 1);

        let rows = store.search_contains(&ads(), &fields, "_", 10).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_rows_decode_to_json_values() {
        let store = create_test_store().await;

        let record = store.fetch_by_id(&ads(), "ra-1").await.unwrap().unwrap();
        assert_eq!(record.get("name"), Some(&json!("William Green")));
        assert_eq!(record.get("age"), Some(&json!(25)));
        assert_eq!(record.get("reward"), Some(&json!(50.0)));

        let record = store.fetch_by_id(&ads(), "ra-2").await.unwrap().unwrap();
        assert_eq!(record.get("age"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_fetch_missing_record() {
        let store = create_test_store().await;
        assert!(store.fetch_by_id(&ads(), "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_column_is_an_error() {
        let store = create_test_store().await;
        let fields = vec!["master".to_string()];

        let result = store.search_contains(&ads(), &fields, "hart", 3).await;
        assert!(matches!(result, Err(Error::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_unknown_column_never_matches_its_own_name() {
        let store = create_test_store().await;
        let fields = vec!["name".to_string(), "master".to_string()];

        let result = store.search_contains(&ads(), &fields, "mast", 3).await;
        assert!(matches!(result, Err(Error::DatabaseError(_))));

        let mut misnamed = ads();
        misnamed.id_field = "record_no".to_string();
        assert!(store.fetch_by_id(&misnamed, "record_no").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_table_is_an_error() {
        let store = create_test_store().await;
        let missing = CollectionDescriptor::new("not_loaded", "Not Loaded", "not-loaded")
            .with_searchable(&["name"])
            .with_identifier(&["name"])
            .resolve()
            .unwrap();

        let result = store
            .search_contains(&missing, &missing.searchable_fields, "sam", 3)
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_like_pattern_escaping() {
        assert_eq!(like_pattern("Wil"), "%wil%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
