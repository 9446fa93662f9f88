//! Application services, editing sessions and ports.

#![forbid(unsafe_code)]

mod acl_service;
mod admin_ports;
mod hook_form;
mod hook_service;
mod loading;
mod permission_matrix;
mod record_browser_service;
mod role_field;
mod schema_editor;
mod schema_editor_service;
pub mod search;
mod user_admin_service;

pub use acl_service::AclService;
pub use admin_ports::{
    AclRepository, EntityTypeSummary, HookRepository, RecordRepository, SchemaRepository,
    SubjectPermissions, UserRepository,
};
pub use hook_form::{FormPhase, HookField, HookFormSession};
pub use hook_service::{HookGroup, HookService};
pub use loading::{DEFAULT_SPINNER_DELAY_MS, LoadTracker, LoadingIndicator, RequestGeneration};
pub use permission_matrix::{
    BulkCommitReport, CellState, EntityFailure, PendingChangeMap, PermissionMatrix,
};
pub use record_browser_service::RecordBrowserService;
pub use role_field::RoleField;
pub use schema_editor::{SYNTHETIC_FIELD_PREFIX, SchemaEditor, operations};
pub use schema_editor_service::SchemaEditorService;
pub use user_admin_service::UserAdminService;
