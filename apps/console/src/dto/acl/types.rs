use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Opens a permission matrix session for a subject, or reloads one for another subject.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/open-acl-session-request.ts"
)]
pub struct OpenAclSessionRequest {
    pub subject: String,
}

/// One permission flag of a cell.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/permission-flag-response.ts"
)]
pub struct PermissionFlagResponse {
    pub permission: String,
    pub description: String,
    pub enabled: bool,
    pub changed: bool,
}

/// One (subject, entity) cell of the matrix.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/acl-cell-response.ts"
)]
pub struct AclCellResponse {
    pub entity: String,
    pub state: String,
    pub permissions: Vec<PermissionFlagResponse>,
}

/// Snapshot of a permission matrix session.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/acl-session-response.ts"
)]
pub struct AclSessionResponse {
    pub session_id: String,
    pub subject: Option<String>,
    pub is_loading: bool,
    pub spinner_visible: bool,
    pub needs_reload: bool,
    pub has_unsaved_changes: bool,
    pub pending_entities: Vec<String>,
    pub cells: Vec<AclCellResponse>,
}

/// Flips one permission of one entity.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/toggle-permission-request.ts"
)]
pub struct TogglePermissionRequest {
    pub entity: String,
    pub permission: String,
}

/// Entities to reset; an empty list resets every entity of the matrix.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/restore-defaults-request.ts"
)]
pub struct RestoreDefaultsRequest {
    #[serde(default)]
    pub entities: Vec<String>,
}

/// Failure of one entity in a bulk operation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/entity-failure-response.ts"
)]
pub struct EntityFailureResponse {
    pub entity: String,
    pub message: String,
}

/// Per-entity outcome of a bulk commit or reset, plus the resulting session.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/bulk-commit-response.ts"
)]
pub struct BulkCommitResponse {
    pub succeeded: Vec<String>,
    pub failures: Vec<EntityFailureResponse>,
    pub session: AclSessionResponse,
}
