use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use elysian_domain::RecordQuery;
use serde_json::Value;

use crate::dto::RecordListResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// First page of an entity with no filter.
pub async fn list_records_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> ApiResult<Json<RecordListResponse>> {
    let query = RecordQuery::new(entity.as_str())?;
    run_query(&state, query).await
}

/// Runs a query written by the operator as JSON.
pub async fn query_records_handler(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<RecordListResponse>> {
    let query = RecordQuery::from_value(payload)?;
    run_query(&state, query).await
}

pub async fn delete_record_handler(
    State(state): State<AppState>,
    Path((entity, record_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state
        .record_browser_service
        .delete_record(entity.as_str(), record_id.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn run_query(state: &AppState, query: RecordQuery) -> ApiResult<Json<RecordListResponse>> {
    let records = state.record_browser_service.query(&query).await?;
    Ok(Json(RecordListResponse::new(&query, records)))
}
