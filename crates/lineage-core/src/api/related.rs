//! `GET /collections/{slug}/records/{id}/related`

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::domain::correlation::{Correlation, SearchTerms};

/// Result cap plus optional match-term overrides
#[derive(Debug, Default, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<u32>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub enslaver: Option<String>,
    pub date: Option<String>,
}

impl RelatedParams {
    fn terms(&self) -> SearchTerms {
        SearchTerms {
            name: self.name.clone(),
            location: self.location.clone(),
            enslaver: self.enslaver.clone(),
            date: self.date.clone(),
        }
    }
}

pub(super) async fn related_records(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<Correlation>, ApiError> {
    let collection_id = state.registry.find(&slug)?.id.clone();
    let limit = state.search.config().effective_limit(params.limit);
    let terms = params.terms();

    let span = tracing::info_span!(
        "related",
        request_id = %Uuid::new_v4(),
        collection = %collection_id,
        record = %id
    );

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    async move {
        let correlation = state
            .correlation
            .correlate(&id, &collection_id, &terms, limit, &cancel)
            .await?;
        Ok::<_, ApiError>(Json(correlation))
    }
    .instrument(span)
    .await
}
