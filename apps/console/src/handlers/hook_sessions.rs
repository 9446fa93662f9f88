use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::{HookSessionResponse, OpenHookSessionRequest, UpdateHookFieldsRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn open_hook_session_handler(
    State(state): State<AppState>,
    Json(payload): Json<OpenHookSessionRequest>,
) -> ApiResult<(StatusCode, Json<HookSessionResponse>)> {
    let form = state
        .hook_service
        .open_session(payload.hook_id.as_str())
        .await?;
    let snapshot_form = form.clone();
    let session_id = state.hook_sessions.open(form).await;

    Ok((
        StatusCode::CREATED,
        Json(HookSessionResponse::from_session(
            session_id,
            &snapshot_form,
        )),
    ))
}

pub async fn hook_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<HookSessionResponse>> {
    let session = state.hook_sessions.get(session_id).await?;
    let form = session.lock().await;

    Ok(Json(HookSessionResponse::from_session(session_id, &form)))
}

pub async fn close_hook_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.hook_sessions.close(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Applies every present field, or none of them when one is rejected.
pub async fn update_hook_fields_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<UpdateHookFieldsRequest>,
) -> ApiResult<Json<HookSessionResponse>> {
    let fields = payload.into_fields()?;
    let session = state.hook_sessions.get(session_id).await?;
    let mut form = session.lock().await;

    let mut edited = form.clone();
    for field in fields {
        edited.set_field(field)?;
    }
    *form = edited;

    Ok(Json(HookSessionResponse::from_session(session_id, &form)))
}

pub async fn save_hook_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<HookSessionResponse>> {
    let session = state.hook_sessions.get(session_id).await?;
    let mut form = session.lock().await;
    state.hook_service.save(&mut form).await?;

    Ok(Json(HookSessionResponse::from_session(session_id, &form)))
}
