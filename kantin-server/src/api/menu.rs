//! Menu sales counts

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::error::{AppError, ErrorCode};

use super::ApiResult;
use super::extract::JsonBody;
use crate::catalog::sales::{SalesRequest, aggregate};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SalesCountRequest {
    #[serde(rename = "menuIds")]
    pub menu_ids: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SalesCountResponse {
    #[serde(rename = "salesCounts")]
    pub sales_counts: BTreeMap<String, i64>,
}

/// POST /api/menu/sales-count
pub async fn sales_count(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SalesCountRequest>,
) -> ApiResult<SalesCountResponse> {
    let Some(Value::Array(values)) = req.menu_ids else {
        return Err(AppError::new(ErrorCode::MenuIdsRequired).into());
    };

    let request = SalesRequest::from_values(&values);
    let menu_ids = request.menu_ids();

    // two sequential reads, no snapshot
    let lines = state.store.order_lines_for_menus(&menu_ids).await?;
    let mut order_ids: Vec<i64> = lines.iter().map(|l| l.pesanan_id).collect();
    order_ids.sort_unstable();
    order_ids.dedup();
    let completed = state.store.completed_order_ids(&order_ids).await?;

    let sales_counts = aggregate(&request, &lines, &completed);
    tracing::debug!(
        requested = request.ids.len(),
        lines = lines.len(),
        "sales-count"
    );
    Ok(Json(SalesCountResponse { sales_counts }))
}
