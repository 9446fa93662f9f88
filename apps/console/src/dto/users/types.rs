use elysian_domain::ConsoleUser;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Database user row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub username: String,
    pub role: String,
}

impl From<ConsoleUser> for UserResponse {
    fn from(value: ConsoleUser) -> Self {
        Self {
            username: value.username,
            role: value.role.as_str().to_owned(),
        }
    }
}

/// Query string of the user list.
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
}

/// Requested role for a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/change-role-request.ts"
)]
pub struct ChangeRoleRequest {
    pub role: String,
}

/// New database user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Replacement password for a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/change-password-request.ts"
)]
pub struct ChangePasswordRequest {
    pub password: String,
}
