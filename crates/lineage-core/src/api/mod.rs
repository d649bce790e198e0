//! HTTP API
//!
//! Read-only JSON endpoints over the search and correlation services:
//!
//! - `GET /search?q=&limit=&suggest=`
//! - `GET /collections`
//! - `GET /collections/{slug}/records/{id}/related?limit=&name=&location=&enslaver=&date=`
//! - `GET /health`

mod collections;
mod health;
mod related;
mod search;

pub use collections::CollectionSummary;
pub use related::RelatedParams;
pub use search::SearchParams;

use anyhow::Context;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, SearchConfig};
use crate::domain::correlation::{CorrelationEngine, SqliteLinkStore, SqliteSettingsStore};
use crate::domain::records::SqliteRecordStore;
use crate::domain::registry::CollectionRegistry;
use crate::domain::search::FanOutSearch;
use crate::error::Error;
use crate::storage::{Database, DatabaseConfig};

/// Services shared by every request
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<FanOutSearch>,
    pub correlation: Arc<CorrelationEngine>,
    pub registry: Arc<CollectionRegistry>,
    pub database: Database,
}

impl AppState {
    /// Wire the SQLite stores of `database` into the services
    pub fn new(database: Database, registry: Arc<CollectionRegistry>, config: &SearchConfig) -> Self {
        let pool = database.pool().clone();
        let records = Arc::new(SqliteRecordStore::new(pool.clone()));

        let search = FanOutSearch::new(records.clone(), registry.clone(), config.clone());
        let correlation = CorrelationEngine::new(
            records,
            Arc::new(SqliteLinkStore::new(pool.clone())),
            Arc::new(SqliteSettingsStore::new(pool)),
            registry.clone(),
            config.clone(),
        );

        Self {
            search: Arc::new(search),
            correlation: Arc::new(correlation),
            registry,
            database,
        }
    }

    /// Open the configured database and collection catalog
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let database = Database::new(DatabaseConfig::from_config(config)).await?;
        let registry = CollectionRegistry::load_or_builtin(config.registry.path.as_deref())
            .context("Failed to load collection registry")?;
        Ok(Self::new(database, Arc::new(registry), &config.search))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search::search))
        .route("/collections", get(collections::list_collections))
        .route(
            "/collections/{slug}/records/{id}/related",
            get(related::related_records),
        )
        .route("/health", get(health::health))
        .with_state(state)
}

/// Serve the API on `config.server.bind` until `shutdown` fires
pub async fn serve(config: &Config, shutdown: CancellationToken) -> anyhow::Result<()> {
    let state = AppState::from_config(config).await?;
    let database = state.database.clone();

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        collections = state.registry.len(),
        "lineage api listening on http://{local_addr}"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    database.close().await;
    tracing::info!("lineage api stopped");
    Ok(())
}

/// Library error rendered as `{error, code}` with a matching status
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::CollectionNotFound(_) => StatusCode::NOT_FOUND,
            Error::PrimaryRecord { .. } => StatusCode::BAD_GATEWAY,
            Error::InvalidInput(_) | Error::InvalidIdentifier(_) | Error::Parse(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Timeout(_) | Error::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = self.0.code(), error = %self.0, "request failed");
        }
        (
            status,
            Json(serde_json::json!({
                "error": self.0.to_string(),
                "code": self.0.code(),
            })),
        )
            .into_response()
    }
}
