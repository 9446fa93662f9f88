use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a hook.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/hook-response.ts"
)]
pub struct HookResponse {
    pub id: String,
    pub entity: String,
    pub name: String,
    pub event: String,
    #[ts(type = "number")]
    pub priority: i64,
    pub language: String,
    pub script: String,
    pub bypass_acl: bool,
    pub enabled: bool,
}

/// Hooks of one event, highest priority first.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/hook-group-response.ts"
)]
pub struct HookGroupResponse {
    pub event: String,
    pub hooks: Vec<HookResponse>,
}

/// Incoming payload for hook creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/create-hook-request.ts"
)]
pub struct CreateHookRequest {
    pub event: String,
    pub name: String,
}

/// Opens a form session on an existing hook.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/open-hook-session-request.ts"
)]
pub struct OpenHookSessionRequest {
    pub hook_id: String,
}

/// Field edits applied to a hook draft; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/update-hook-fields-request.ts"
)]
pub struct UpdateHookFieldsRequest {
    pub name: Option<String>,
    pub event: Option<String>,
    #[ts(type = "number | null")]
    pub priority: Option<i64>,
    pub script: Option<String>,
    pub bypass_acl: Option<bool>,
    pub enabled: Option<bool>,
}

/// Snapshot of a hook form session.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/hook-session-response.ts"
)]
pub struct HookSessionResponse {
    pub session_id: String,
    pub phase: String,
    pub draft: Option<HookResponse>,
    pub has_unsaved_changes: bool,
    pub is_valid: bool,
    pub violations: Vec<String>,
}
