use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use elysian_application::RoleField;
use elysian_domain::Role;

use crate::dto::{
    ChangePasswordRequest, ChangeRoleRequest, CreateUserRequest, UserListQuery, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_admin_service
        .list_users(query.search.as_deref().unwrap_or_default())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn change_user_role_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<ChangeRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let role = Role::from_str(payload.role.as_str())?;
    let user = state
        .user_admin_service
        .find_user(username.as_str())
        .await?;

    let mut field = RoleField::new(user.role);
    let role = state
        .user_admin_service
        .change_role(username.as_str(), &mut field, role)
        .await?;

    Ok(Json(UserResponse {
        username,
        role: role.as_str().to_owned(),
    }))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let role = Role::from_str(payload.role.as_str())?;
    let user = state
        .user_admin_service
        .create_user(payload.username.as_str(), payload.password.as_str(), role)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn change_user_password_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    state
        .user_admin_service
        .change_password(username.as_str(), payload.password.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .user_admin_service
        .delete_user(username.as_str())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
