use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use elysian_application::PermissionMatrix;
use elysian_core::NonEmptyString;
use elysian_domain::AclPermission;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::{
    AclSessionResponse, BulkCommitResponse, OpenAclSessionRequest, RestoreDefaultsRequest,
    TogglePermissionRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_acl_entities_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.acl_service.list_entity_names().await?))
}

pub async fn open_acl_session_handler(
    State(state): State<AppState>,
    Json(payload): Json<OpenAclSessionRequest>,
) -> ApiResult<(StatusCode, Json<AclSessionResponse>)> {
    let subject = NonEmptyString::new(payload.subject.trim())?;
    let session_id = state.acl_sessions.open(PermissionMatrix::new()).await;

    let loaded = load_subject(&state, session_id, subject.as_str()).await;
    if loaded.is_err() {
        state.acl_sessions.close(session_id).await?;
    }

    Ok((StatusCode::CREATED, loaded?))
}

/// Points an existing session at a subject, dropping edits when the subject changes.
pub async fn load_acl_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<OpenAclSessionRequest>,
) -> ApiResult<Json<AclSessionResponse>> {
    let subject = NonEmptyString::new(payload.subject.trim())?;
    load_subject(&state, session_id, subject.as_str()).await
}

pub async fn acl_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<AclSessionResponse>> {
    let session = state.acl_sessions.get(session_id).await?;
    let matrix = session.lock().await;

    Ok(Json(AclSessionResponse::from_matrix(
        session_id,
        &matrix,
        Utc::now(),
    )))
}

pub async fn close_acl_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.acl_sessions.close(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_permission_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<TogglePermissionRequest>,
) -> ApiResult<Json<AclSessionResponse>> {
    let permission = AclPermission::from_str(payload.permission.as_str())?;
    let session = state.acl_sessions.get(session_id).await?;
    let mut matrix = session.lock().await;
    matrix.toggle(payload.entity.as_str(), permission)?;

    Ok(Json(AclSessionResponse::from_matrix(
        session_id,
        &matrix,
        Utc::now(),
    )))
}

pub async fn commit_acl_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<BulkCommitResponse>> {
    let session = state.acl_sessions.get(session_id).await?;
    let mut matrix = session.lock().await;
    let report = state.acl_service.commit_pending(&mut matrix).await?;

    Ok(Json(BulkCommitResponse::new(
        report,
        AclSessionResponse::from_matrix(session_id, &matrix, Utc::now()),
    )))
}

pub async fn restore_defaults_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<RestoreDefaultsRequest>,
) -> ApiResult<Json<BulkCommitResponse>> {
    let session = state.acl_sessions.get(session_id).await?;
    let mut matrix = session.lock().await;
    let entities = if payload.entities.is_empty() {
        matrix.entities().map(str::to_owned).collect()
    } else {
        payload.entities
    };

    let report = state
        .acl_service
        .restore_defaults(&mut matrix, entities.as_slice())
        .await?;

    Ok(Json(BulkCommitResponse::new(
        report,
        AclSessionResponse::from_matrix(session_id, &matrix, Utc::now()),
    )))
}

/// Loads a subject row without holding the session lock across the remote call.
///
/// Edits are rejected while the load runs. A response overtaken by a newer
/// load is dropped.
async fn load_subject(
    state: &AppState,
    session_id: Uuid,
    subject: &str,
) -> ApiResult<Json<AclSessionResponse>> {
    let session = state.acl_sessions.get(session_id).await?;
    let generation = session.lock().await.begin_load(subject, Utc::now());

    let fetched = state.acl_service.fetch_permissions(subject).await;

    let mut matrix = session.lock().await;
    match fetched {
        Ok(permissions) => {
            if !matrix.apply_baseline(generation, permissions) {
                info!(
                    session = %session_id,
                    subject = subject,
                    generation = generation.value(),
                    "discarded stale permission row"
                );
            }
        }
        Err(error) => {
            matrix.fail_load(generation);
            warn!(
                session = %session_id,
                subject = subject,
                error = %error,
                "permission row load failed"
            );
            return Err(error.into());
        }
    }

    Ok(Json(AclSessionResponse::from_matrix(
        session_id,
        &matrix,
        Utc::now(),
    )))
}
