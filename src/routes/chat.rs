use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Map, Value};

use crate::{
    error::{AppError, INVALID_BODY},
    message::{ChatRequest, HealthResponse},
    services::reply::normalize,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Map<String, Value>>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("chat body rejected: {}", rejection.body_text());
        AppError::BadRequest(INVALID_BODY)
    })?;

    let upstream = request.into_payload()?;
    let url = state.settings.webhook_url();
    let reply = state.webhook.call(url, &upstream).await?;

    Ok(Json(normalize(reply)))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "MuDo backend is running".to_string(),
    })
}
