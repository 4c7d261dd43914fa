//! Connectivity checks for the database and the email provider

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use super::ApiResult;
use crate::email;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DbCheckResponse {
    pub ok: bool,
    pub kantin_count: i64,
}

/// GET /api/test-db
pub async fn test_db(State(state): State<AppState>) -> ApiResult<DbCheckResponse> {
    let kantin_count = state.store.ping().await?;
    Ok(Json(DbCheckResponse {
        ok: true,
        kantin_count,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct TestEmailQuery {
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailCheckResponse {
    pub ok: bool,
    pub id: String,
}

/// GET /api/test-email?to=
pub async fn test_email(
    State(state): State<AppState>,
    Query(query): Query<TestEmailQuery>,
) -> ApiResult<EmailCheckResponse> {
    let to = query
        .to
        .filter(|t| !t.trim().is_empty())
        .or_else(|| state.email_test_to.clone())
        .ok_or_else(|| AppError::required("to"))?;

    let mailer = state
        .mailer
        .as_deref()
        .ok_or_else(|| AppError::config("Email provider is not configured"))?;

    let id = email::send_test_email(mailer, to.trim()).await.map_err(|e| {
        tracing::error!(error = %e, "Test email failed");
        AppError::with_message(ErrorCode::EmailDeliveryFailed, e.to_string())
    })?;

    Ok(Json(EmailCheckResponse { ok: true, id }))
}
