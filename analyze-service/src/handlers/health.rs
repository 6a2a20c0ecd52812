use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. The provider is not contacted.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "analyze-service",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provider.name(),
    }))
}
