use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Entity type listed on the console landing page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/entity-type-response.ts"
)]
pub struct EntityTypeResponse {
    pub entity_id: String,
    pub is_manually_managed: bool,
}

/// Incoming payload for entity type creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/create-entity-type-request.ts"
)]
pub struct CreateEntityTypeRequest {
    pub entity_id: String,
}

/// Opens a schema editing session on an entity.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/open-schema-session-request.ts"
)]
pub struct OpenSchemaSessionRequest {
    pub entity_id: String,
}

/// One field of the edited tree, children in display order.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/field-node-response.ts"
)]
pub struct FieldNodeResponse {
    pub key: String,
    pub name: String,
    pub field_type: String,
    pub required: bool,
    pub children: Option<Vec<FieldNodeResponse>>,
}

/// Snapshot of a schema editing session.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/schema-session-response.ts"
)]
pub struct SchemaSessionResponse {
    pub session_id: String,
    pub entity_id: String,
    pub is_manually_managed: bool,
    pub has_unsaved_changes: bool,
    pub fields: Vec<FieldNodeResponse>,
}

/// Adds a synthetic child under the field at `path`; an empty path targets the root.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/add-field-request.ts"
)]
pub struct AddFieldRequest {
    #[serde(default)]
    pub path: Vec<String>,
}

/// Key of the added field plus the resulting session.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/add-field-response.ts"
)]
pub struct AddFieldResponse {
    pub added_key: String,
    pub session: SchemaSessionResponse,
}

/// Partial update of the field `key` inside the mapping at `path`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/update-field-request.ts"
)]
pub struct UpdateFieldRequest {
    #[serde(default)]
    pub path: Vec<String>,
    pub key: String,
    pub name: Option<String>,
    pub field_type: Option<String>,
    pub required: Option<bool>,
}

/// Renames the field `key` inside the mapping at `path`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/rename-field-request.ts"
)]
pub struct RenameFieldRequest {
    #[serde(default)]
    pub path: Vec<String>,
    pub key: String,
    pub new_name: String,
}

/// Deletes the field `key`, and its subtree, from the mapping at `path`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/delete-field-request.ts"
)]
pub struct DeleteFieldRequest {
    #[serde(default)]
    pub path: Vec<String>,
    pub key: String,
}
