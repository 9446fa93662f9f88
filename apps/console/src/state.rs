use std::sync::Arc;

use elysian_application::{
    AclRepository, AclService, HookFormSession, HookRepository, HookService, PermissionMatrix,
    RecordBrowserService, RecordRepository, SchemaEditor, SchemaEditorService, SchemaRepository,
    UserAdminService, UserRepository,
};

use crate::session_registry::SessionRegistry;

/// Shared console state.
#[derive(Clone)]
pub struct AppState {
    pub schema_editor_service: SchemaEditorService,
    pub acl_service: AclService,
    pub hook_service: HookService,
    pub user_admin_service: UserAdminService,
    pub record_browser_service: RecordBrowserService,
    pub schema_sessions: SessionRegistry<SchemaEditor>,
    pub acl_sessions: SessionRegistry<PermissionMatrix>,
    pub hook_sessions: SessionRegistry<HookFormSession>,
}

impl AppState {
    /// Wires every service to one backing store.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: SchemaRepository
            + AclRepository
            + HookRepository
            + UserRepository
            + RecordRepository
            + 'static,
    {
        let schema_repository: Arc<dyn SchemaRepository> = store.clone();
        let acl_repository: Arc<dyn AclRepository> = store.clone();
        let hook_repository: Arc<dyn HookRepository> = store.clone();
        let user_repository: Arc<dyn UserRepository> = store.clone();
        let record_repository: Arc<dyn RecordRepository> = store;

        Self {
            schema_editor_service: SchemaEditorService::new(schema_repository),
            acl_service: AclService::new(acl_repository),
            hook_service: HookService::new(hook_repository),
            user_admin_service: UserAdminService::new(user_repository),
            record_browser_service: RecordBrowserService::new(record_repository),
            schema_sessions: SessionRegistry::new("schema"),
            acl_sessions: SessionRegistry::new("acl"),
            hook_sessions: SessionRegistry::new("hook"),
        }
    }
}
