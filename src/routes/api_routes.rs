use atdigital_chat_core::webhook::ChatPayload;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::errors::AppError;
use crate::models::ErrorBody;
use crate::service::chat_service::ChatService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/chat`: relays the widget's payload to the webhook and passes
/// its JSON answer straight back.
pub async fn chat_handler(
    State(svc): State<ChatService>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return error_response(&AppError::invalid_payload(rejection.body_text())),
    };

    match svc.relay(payload).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/health`
pub async fn health_handler() -> &'static str {
    "ok"
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_webhook_failure() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!("Chat request failed with {status}: {err}");
    (status, Json(ErrorBody::new(err.to_string()))).into_response()
}
