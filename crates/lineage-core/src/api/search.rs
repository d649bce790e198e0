//! `GET /search`

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::domain::search::{SearchRequest, SearchResponse};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
    #[serde(default)]
    pub suggest: bool,
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        Self {
            query: params.q,
            limit: params.limit,
            suggest: params.suggest,
        }
    }
}

pub(super) async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = SearchRequest::from(params);
    let span = tracing::info_span!("search", request_id = %Uuid::new_v4(), query = %request.query);

    // Dropping this handler (client gone) cancels the in-flight fan-out
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    async move {
        let response = state.search.search(&request, &cancel).await?;
        tracing::info!(
            total = response.total,
            failed = response.errors.len(),
            "search served"
        );
        Ok::<_, ApiError>(Json(response))
    }
    .instrument(span)
    .await
}
