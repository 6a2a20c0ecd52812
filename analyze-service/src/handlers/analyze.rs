use crate::models::{AnalyzeRequest, AnalyzeResponse};
use crate::prompts::Prompt;
use crate::services::ProviderError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

/// `POST /api/analyze`: template a prompt for the submitted username and relay
/// the provider's text back unchanged.
///
/// Provider-reported errors come back as a normal `200` result so the caller
/// can render them inline; every other failure is an opaque `500`.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::EngineFailure(anyhow::anyhow!("invalid request body: {}", e.body_text()))
    })?;

    let mode = request.mode();
    let username = request.username();
    let prompt = Prompt::new(mode, &username);

    tracing::info!(
        mode = %mode,
        username_len = username.len(),
        provider = state.provider.name(),
        "Running analysis"
    );

    match state.provider.generate(&prompt).await {
        Ok(text) => Ok(Json(AnalyzeResponse { result: text })),
        Err(ProviderError::Upstream(message)) => {
            tracing::warn!(
                provider = state.provider.name(),
                error = %message,
                "Provider reported an error"
            );
            Ok(Json(AnalyzeResponse::upstream_error(&message)))
        }
        Err(e) => Err(AppError::EngineFailure(anyhow::Error::new(e))),
    }
}
