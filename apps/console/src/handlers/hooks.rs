use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use elysian_domain::HookEvent;

use crate::dto::{CreateHookRequest, HookGroupResponse, HookResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_hooks_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> ApiResult<Json<Vec<HookGroupResponse>>> {
    let groups = state
        .hook_service
        .list_hooks(entity.as_str())
        .await?
        .into_iter()
        .map(HookGroupResponse::from)
        .collect();

    Ok(Json(groups))
}

pub async fn create_hook_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Json(payload): Json<CreateHookRequest>,
) -> ApiResult<(StatusCode, Json<HookResponse>)> {
    let event = HookEvent::from_str(payload.event.as_str())?;
    let hook = state
        .hook_service
        .create_hook(entity.as_str(), event, payload.name.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(HookResponse::from(hook))))
}

pub async fn delete_hook_handler(
    State(state): State<AppState>,
    Path(hook_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.hook_service.delete_hook(hook_id.as_str()).await?;
    Ok(StatusCode::NO_CONTENT)
}
