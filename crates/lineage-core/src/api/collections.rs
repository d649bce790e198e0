//! `GET /collections`

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use std::collections::HashSet;

use super::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub id: String,
    pub slug: String,
    pub display_name: String,
    pub searchable_fields: Vec<String>,
    /// Searched by the correlation heuristics
    pub cross_referenced: bool,
}

pub(super) async fn list_collections(State(state): State<AppState>) -> Json<Vec<CollectionSummary>> {
    let cross: HashSet<&str> = state
        .registry
        .cross_referenced()
        .map(|c| c.id.as_str())
        .collect();

    let summaries = state
        .registry
        .iter()
        .map(|c| CollectionSummary {
            id: c.id.clone(),
            slug: c.slug.clone(),
            display_name: c.display_name.clone(),
            searchable_fields: c.searchable_fields.clone(),
            cross_referenced: cross.contains(c.id.as_str()),
        })
        .collect();

    Json(summaries)
}
