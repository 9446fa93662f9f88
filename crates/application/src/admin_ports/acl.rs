use std::collections::BTreeMap;

use async_trait::async_trait;

use elysian_core::AppResult;
use elysian_domain::PermissionSet;

/// Permission sets of one subject keyed by entity name.
pub type SubjectPermissions = BTreeMap<String, PermissionSet>;

/// Repository port for per-entity access control lists.
#[async_trait]
pub trait AclRepository: Send + Sync {
    /// Lists the entity names permissions can be granted on.
    async fn list_entity_names(&self) -> AppResult<Vec<String>>;

    /// Loads the full row of permission sets for a subject.
    async fn load_permissions_for_subject(&self, subject: &str) -> AppResult<SubjectPermissions>;

    /// Writes one permission set for a subject on an entity.
    async fn write_permission(
        &self,
        subject: &str,
        entity: &str,
        permissions: &PermissionSet,
    ) -> AppResult<()>;

    /// Resets a subject's permissions on an entity to the server default.
    async fn reset_permission_to_default(&self, subject: &str, entity: &str) -> AppResult<()>;
}
