use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use elysian_domain::FieldPath;
use tracing::info;
use uuid::Uuid;

use crate::dto::{
    AddFieldRequest, AddFieldResponse, DeleteFieldRequest, OpenSchemaSessionRequest,
    RenameFieldRequest, SchemaSessionResponse, UpdateFieldRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn open_schema_session_handler(
    State(state): State<AppState>,
    Json(payload): Json<OpenSchemaSessionRequest>,
) -> ApiResult<(StatusCode, Json<SchemaSessionResponse>)> {
    let editor = state
        .schema_editor_service
        .open_editor(payload.entity_id.as_str())
        .await?;
    let snapshot_editor = editor.clone();
    let session_id = state.schema_sessions.open(editor).await;

    info!(session = %session_id, entity = %snapshot_editor.entity_id(), "schema session opened");
    Ok((
        StatusCode::CREATED,
        Json(SchemaSessionResponse::from_editor(
            session_id,
            &snapshot_editor,
        )),
    ))
}

pub async fn schema_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SchemaSessionResponse>> {
    let session = state.schema_sessions.get(session_id).await?;
    let editor = session.lock().await;

    Ok(Json(SchemaSessionResponse::from_editor(session_id, &editor)))
}

pub async fn close_schema_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.schema_sessions.close(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_field_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<AddFieldRequest>,
) -> ApiResult<Json<AddFieldResponse>> {
    let session = state.schema_sessions.get(session_id).await?;
    let mut editor = session.lock().await;
    let added_key = editor.add_child(&FieldPath::from_segments(payload.path))?;

    Ok(Json(AddFieldResponse {
        added_key,
        session: SchemaSessionResponse::from_editor(session_id, &editor),
    }))
}

pub async fn update_field_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<UpdateFieldRequest>,
) -> ApiResult<Json<SchemaSessionResponse>> {
    let (path, key, patch) = payload.into_parts()?;
    let session = state.schema_sessions.get(session_id).await?;
    let mut editor = session.lock().await;
    editor.update_field(&path, key.as_str(), patch)?;

    Ok(Json(SchemaSessionResponse::from_editor(session_id, &editor)))
}

pub async fn rename_field_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<RenameFieldRequest>,
) -> ApiResult<Json<SchemaSessionResponse>> {
    let session = state.schema_sessions.get(session_id).await?;
    let mut editor = session.lock().await;
    editor.rename_field(
        &FieldPath::from_segments(payload.path),
        payload.key.as_str(),
        payload.new_name.as_str(),
    )?;

    Ok(Json(SchemaSessionResponse::from_editor(session_id, &editor)))
}

pub async fn delete_field_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<DeleteFieldRequest>,
) -> ApiResult<Json<SchemaSessionResponse>> {
    let session = state.schema_sessions.get(session_id).await?;
    let mut editor = session.lock().await;
    editor.delete_field(&FieldPath::from_segments(payload.path), payload.key.as_str())?;

    Ok(Json(SchemaSessionResponse::from_editor(session_id, &editor)))
}

pub async fn commit_schema_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SchemaSessionResponse>> {
    let session = state.schema_sessions.get(session_id).await?;
    let mut editor = session.lock().await;
    state.schema_editor_service.save(&mut editor).await?;

    Ok(Json(SchemaSessionResponse::from_editor(session_id, &editor)))
}
