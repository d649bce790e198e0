//! `GET /health`

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use super::AppState;

pub(super) async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.database.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "collections": state.registry.len(),
                "checked_at": Utc::now(),
            })),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "error": format!("{err:#}"),
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::archive_state;

    #[tokio::test]
    async fn test_health_ok() {
        let state = archive_state().await;

        let response = health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_unavailable_after_close() {
        let state = archive_state().await;
        state.database.close().await;

        let response = health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
