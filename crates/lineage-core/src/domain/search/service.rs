//! Fan-out search across every registered collection
//!
//! Each collection is queried independently under a bounded concurrency
//! limit and a shared deadline. A collection that fails or misses the
//! deadline is reported in `errors` and the rest of the response is
//! returned as usual.

use futures_util::{StreamExt, stream};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::entity::{
    CollectionError, MAX_SUGGESTIONS, MIN_QUERY_CHARS, SearchRequest, SearchResponse,
    SearchResult,
};
use super::fanout::{LookupBudget, bounded_lookup};
use super::ranking;
use crate::config::SearchConfig;
use crate::domain::records::{Record, RecordStore};
use crate::domain::registry::CollectionRegistry;
use crate::error::{Error, Result};

/// Service running a query against all collections in the registry
#[derive(Clone)]
pub struct FanOutSearch {
    store: Arc<dyn RecordStore>,
    registry: Arc<CollectionRegistry>,
    config: SearchConfig,
}

impl FanOutSearch {
    pub fn new(
        store: Arc<dyn RecordStore>,
        registry: Arc<CollectionRegistry>,
        config: SearchConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search all collections for `request.query`
    ///
    /// Only cancellation is an error; store failures are reported per
    /// collection in the response.
    pub async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse> {
        let query = request.query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchResponse::too_short(query));
        }

        let limit = self.config.effective_limit(request.limit);
        let budget = LookupBudget::start(&self.config, cancel);

        let lookups: Vec<_> = self
            .registry
            .iter()
            .map(|collection| {
                bounded_lookup(
                    Arc::clone(&self.store),
                    collection.clone(),
                    collection.searchable_fields.clone(),
                    query.to_string(),
                    limit,
                    budget.clone(),
                )
            })
            .collect();

        let outcomes: Vec<Result<Vec<Record>>> = stream::iter(lookups)
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut results = Vec::new();
        let mut suggestions: Vec<String> = Vec::new();
        let mut errors = Vec::new();

        for (collection, outcome) in self.registry.iter().zip(outcomes) {
            let rows = match outcome {
                Ok(rows) => rows,
                Err(err) => {
                    tracing::warn!(
                        collection = %collection.id,
                        error = %err,
                        "collection search failed"
                    );
                    errors.push(CollectionError {
                        collection: collection.id.clone(),
                        slug: collection.slug.clone(),
                        message: match err {
                            Error::Timeout(_) => "timed out".to_string(),
                            other => other.to_string(),
                        },
                    });
                    continue;
                }
            };

            tracing::debug!(collection = %collection.id, rows = rows.len(), "collection searched");

            for row in rows {
                let identifier = ranking::identifier(&row, collection);
                if request.suggest
                    && suggestions.len() < MAX_SUGGESTIONS
                    && !identifier.is_empty()
                    && !suggestions.contains(&identifier)
                {
                    suggestions.push(identifier.clone());
                }
                results.push(SearchResult {
                    collection: collection.reference(),
                    snippet: ranking::snippet(&row, collection, query),
                    identifier,
                    fields: row,
                });
            }
        }

        ranking::rank(&mut results, query);
        results.truncate(limit as usize);

        tracing::info!(
            query,
            results = results.len(),
            failed = errors.len(),
            "search completed"
        );

        Ok(SearchResponse {
            total: results.len(),
            results,
            suggestions,
            query: query.to_string(),
            errors,
            message: None,
        })
    }
}
