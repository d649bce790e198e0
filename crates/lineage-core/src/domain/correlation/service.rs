//! Correlation engine
//!
//! Builds the "related records" list for one record: admin-curated links
//! first, then heuristic matches found by probing the cross-referenced
//! collections and scored against the current record.

use futures_util::{StreamExt, stream};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::entity::{MatchOrigin, RelatedRecordCandidate, SearchTerms};
use super::heuristics::{ROWS_PER_QUERY, plan_queries};
use super::repository_trait::{LinkStore, SettingsStore};
use super::settings::MatchSettings;
use crate::config::SearchConfig;
use crate::domain::records::{ExtractedAttributes, Record, RecordStore};
use crate::domain::registry::{CollectionDescriptor, CollectionRegistry};
use crate::domain::scoring;
use crate::domain::search::fanout::{LookupBudget, bounded_lookup};
use crate::domain::search::ranking;
use crate::error::{Error, Result};

/// Outcome of one correlation request
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Correlation {
    pub related: Vec<RelatedRecordCandidate>,
    /// Whether stored settings were found, as opposed to defaults
    pub settings_explicit: bool,
}

#[derive(Clone)]
pub struct CorrelationEngine {
    records: Arc<dyn RecordStore>,
    links: Arc<dyn LinkStore>,
    settings: Arc<dyn SettingsStore>,
    registry: Arc<CollectionRegistry>,
    config: SearchConfig,
}

impl CorrelationEngine {
    pub fn new(
        records: Arc<dyn RecordStore>,
        links: Arc<dyn LinkStore>,
        settings: Arc<dyn SettingsStore>,
        registry: Arc<CollectionRegistry>,
        config: SearchConfig,
    ) -> Self {
        Self {
            records,
            links,
            settings,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    /// Related records for `current_id`, capped by settings or `limit`
    pub async fn related_records(
        &self,
        current_id: &str,
        current_collection_id: &str,
        terms: &SearchTerms,
        limit: u32,
    ) -> Result<Vec<RelatedRecordCandidate>> {
        let correlation = self
            .correlate(
                current_id,
                current_collection_id,
                terms,
                limit,
                &CancellationToken::new(),
            )
            .await?;
        Ok(correlation.related)
    }

    /// Like [`Self::related_records`], also reporting whether stored
    /// settings were used; stops probing when `cancel` fires
    pub async fn correlate(
        &self,
        current_id: &str,
        current_collection_id: &str,
        terms: &SearchTerms,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Correlation> {
        let collection = self.registry.find(current_collection_id)?;
        let (settings, settings_explicit) = self.load_settings().await;

        let mut current = self.current_attributes(collection, current_id).await?;
        terms.apply(&mut current);

        let max_results = settings.effective_max_results(limit);
        let admin = self.admin_results(current_id).await;

        let heuristic = if settings.auto_match_enabled {
            let mut seen: HashSet<String> = admin.iter().map(|c| c.id.clone()).collect();
            seen.insert(current_id.to_string());
            self.heuristic_results(&settings, collection, &current, seen, max_results, cancel)
                .await
        } else {
            Vec::new()
        };

        tracing::info!(
            record = current_id,
            collection = %collection.id,
            admin = admin.len(),
            heuristic = heuristic.len(),
            "related records resolved"
        );

        let related = admin
            .into_iter()
            .chain(heuristic)
            .take(max_results)
            .collect();

        Ok(Correlation {
            related,
            settings_explicit,
        })
    }

    async fn load_settings(&self) -> (MatchSettings, bool) {
        match self.settings.load().await {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::debug!(error = %err, "match settings unavailable, using defaults");
                (MatchSettings::defaults(), false)
            }
        }
    }

    async fn current_attributes(
        &self,
        collection: &CollectionDescriptor,
        current_id: &str,
    ) -> Result<ExtractedAttributes> {
        let record = self
            .records
            .fetch_by_id(collection, current_id)
            .await
            .map_err(|err| Error::PrimaryRecord {
                collection: collection.id.clone(),
                id: current_id.to_string(),
                reason: err.to_string(),
            })?;

        let mut attributes = match record {
            Some(record) => ExtractedAttributes::from_record(&record, collection),
            None => {
                tracing::debug!(record = current_id, "current record not found, using search terms only");
                ExtractedAttributes::default()
            }
        };
        attributes.id = Some(current_id.to_string());
        Ok(attributes)
    }

    /// Visible links, featured first then by descending priority, one
    /// entry per related record
    async fn admin_results(&self, current_id: &str) -> Vec<RelatedRecordCandidate> {
        let links = match self.links.links_for(current_id).await {
            Ok(links) => links,
            Err(err) => {
                tracing::warn!(record = current_id, error = %err, "admin links unavailable");
                return Vec::new();
            }
        };

        let mut candidates: Vec<RelatedRecordCandidate> = links
            .iter()
            .filter_map(|link| RelatedRecordCandidate::from_link(link, current_id))
            .filter(|candidate| candidate.id != current_id)
            .collect();

        candidates.sort_by_key(|c| (Reverse(c.featured), Reverse(c.priority)));

        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.id.clone()));
        candidates
    }

    async fn heuristic_results(
        &self,
        settings: &MatchSettings,
        collection: &CollectionDescriptor,
        current: &ExtractedAttributes,
        mut seen: HashSet<String>,
        max_results: usize,
        cancel: &CancellationToken,
    ) -> Vec<RelatedRecordCandidate> {
        let targets: Vec<&CollectionDescriptor> = self
            .registry
            .cross_referenced()
            .filter(|c| c.id != collection.id)
            .collect();
        let queries = plan_queries(settings, current, &targets);

        let mut results: Vec<RelatedRecordCandidate> = Vec::new();
        if max_results == 0 || queries.is_empty() {
            return results;
        }

        let budget = LookupBudget::start(&self.config, cancel);
        let lookups: Vec<_> = queries
            .iter()
            .map(|query| {
                bounded_lookup(
                    Arc::clone(&self.records),
                    query.collection.clone(),
                    query.fields.clone(),
                    query.needle.clone(),
                    ROWS_PER_QUERY,
                    budget.clone(),
                )
            })
            .collect();

        // Dropping the stream at the cap cancels queries still in flight
        let mut outcomes = stream::iter(lookups)
            .buffered(self.config.concurrency.max(1))
            .enumerate();

        'queries: while let Some((index, outcome)) = outcomes.next().await {
            let query = &queries[index];
            let rows = match outcome {
                Ok(rows) => rows,
                Err(err) => {
                    tracing::debug!(
                        pass = %query.pass,
                        collection = %query.collection.id,
                        fields = ?query.fields,
                        error = %err,
                        "heuristic query skipped"
                    );
                    if cancel.is_cancelled() {
                        break;
                    }
                    continue;
                }
            };

            for row in rows {
                let attributes = ExtractedAttributes::from_record(&row, query.collection);
                let Some(id) = attributes.id.clone() else {
                    continue;
                };
                if !seen.insert(id.clone()) {
                    continue;
                }

                let relevance = scoring::score(&attributes, current);
                let detail = if relevance.is_empty() {
                    query.pass.label().to_string()
                } else {
                    relevance.reasons.join("; ")
                };

                results.push(RelatedRecordCandidate {
                    name: display_name(&row, query.collection, &attributes, &id),
                    id,
                    source_collection: collection.slug.clone(),
                    target_collection: query.collection.slug.clone(),
                    detail,
                    origin: MatchOrigin::Heuristic,
                    priority: 0,
                    featured: false,
                    custom_badge: None,
                    score: Some(relevance.score),
                    reasons: relevance.reasons,
                });

                if results.len() >= max_results {
                    break 'queries;
                }
            }
        }

        // Stable: discovery order breaks ties
        results.sort_by_key(|c| Reverse(c.score.unwrap_or_default()));
        results
    }
}

fn display_name(
    row: &Record,
    collection: &CollectionDescriptor,
    attributes: &ExtractedAttributes,
    id: &str,
) -> String {
    let identifier = ranking::identifier(row, collection);
    if !identifier.is_empty() {
        return identifier;
    }
    attributes.name.clone().unwrap_or_else(|| id.to_string())
}
