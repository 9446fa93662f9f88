mod acl;
mod common;
mod hooks;
mod records;
mod schema;
mod users;

pub use acl::{
    AclSessionResponse, BulkCommitResponse, OpenAclSessionRequest, RestoreDefaultsRequest,
    TogglePermissionRequest,
};
pub use common::HealthResponse;
pub use hooks::{
    CreateHookRequest, HookGroupResponse, HookResponse, HookSessionResponse,
    OpenHookSessionRequest, UpdateHookFieldsRequest,
};
pub use records::RecordListResponse;
pub use schema::{
    AddFieldRequest, AddFieldResponse, CreateEntityTypeRequest, DeleteFieldRequest,
    EntityTypeResponse, OpenSchemaSessionRequest, RenameFieldRequest, SchemaSessionResponse,
    UpdateFieldRequest,
};
pub use users::{
    ChangePasswordRequest, ChangeRoleRequest, CreateUserRequest, UserListQuery, UserResponse,
};

#[cfg(test)]
mod tests {
    use super::acl::{AclCellResponse, EntityFailureResponse, PermissionFlagResponse};
    use super::schema::FieldNodeResponse;
    use super::{
        AclSessionResponse, AddFieldRequest, AddFieldResponse, BulkCommitResponse,
        ChangePasswordRequest, ChangeRoleRequest, CreateEntityTypeRequest, CreateHookRequest,
        CreateUserRequest, DeleteFieldRequest, EntityTypeResponse, HealthResponse,
        HookGroupResponse, HookResponse, HookSessionResponse, OpenAclSessionRequest,
        OpenHookSessionRequest, OpenSchemaSessionRequest, RecordListResponse, RenameFieldRequest,
        RestoreDefaultsRequest, SchemaSessionResponse, TogglePermissionRequest,
        UpdateFieldRequest, UpdateHookFieldsRequest, UserResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        EntityTypeResponse::export(&config)?;
        CreateEntityTypeRequest::export(&config)?;
        OpenSchemaSessionRequest::export(&config)?;
        FieldNodeResponse::export(&config)?;
        SchemaSessionResponse::export(&config)?;
        AddFieldRequest::export(&config)?;
        AddFieldResponse::export(&config)?;
        UpdateFieldRequest::export(&config)?;
        RenameFieldRequest::export(&config)?;
        DeleteFieldRequest::export(&config)?;
        OpenAclSessionRequest::export(&config)?;
        PermissionFlagResponse::export(&config)?;
        AclCellResponse::export(&config)?;
        AclSessionResponse::export(&config)?;
        TogglePermissionRequest::export(&config)?;
        RestoreDefaultsRequest::export(&config)?;
        EntityFailureResponse::export(&config)?;
        BulkCommitResponse::export(&config)?;
        HookResponse::export(&config)?;
        HookGroupResponse::export(&config)?;
        CreateHookRequest::export(&config)?;
        OpenHookSessionRequest::export(&config)?;
        UpdateHookFieldsRequest::export(&config)?;
        HookSessionResponse::export(&config)?;
        UserResponse::export(&config)?;
        ChangeRoleRequest::export(&config)?;
        CreateUserRequest::export(&config)?;
        ChangePasswordRequest::export(&config)?;
        RecordListResponse::export(&config)?;

        Ok(())
    }
}
