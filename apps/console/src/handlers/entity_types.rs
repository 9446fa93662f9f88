use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{CreateEntityTypeRequest, EntityTypeResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_entity_types_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<EntityTypeResponse>>> {
    let entity_types = state
        .schema_editor_service
        .list_entity_types()
        .await?
        .into_iter()
        .map(EntityTypeResponse::from)
        .collect();

    Ok(Json(entity_types))
}

pub async fn create_entity_type_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateEntityTypeRequest>,
) -> ApiResult<(StatusCode, Json<EntityTypeResponse>)> {
    let entity_id = state
        .schema_editor_service
        .create_entity_type(payload.entity_id.as_str())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntityTypeResponse {
            entity_id: entity_id.into(),
            is_manually_managed: false,
        }),
    ))
}

pub async fn drop_entity_type_handler(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .schema_editor_service
        .drop_entity_type(entity_id.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
