use std::collections::BTreeMap;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Method;
use tracing::warn;

use elysian_application::{AclRepository, SchemaRepository, SubjectPermissions};
use elysian_core::AppResult;
use elysian_domain::{AclPermission, PermissionSet};

use super::HttpElysianAdminClient;
use super::wire::{AclEntryBody, PermissionsBody};

#[async_trait]
impl AclRepository for HttpElysianAdminClient {
    async fn list_entity_names(&self) -> AppResult<Vec<String>> {
        Ok(self
            .list_entity_types()
            .await?
            .into_iter()
            .map(|entity_type| entity_type.entity_id)
            .collect())
    }

    async fn load_permissions_for_subject(&self, subject: &str) -> AppResult<SubjectPermissions> {
        let url = self.endpoint(&["acl", subject])?;
        let entries: Option<Vec<AclEntryBody>> =
            self.send_json(self.request(Method::GET, url)).await?;

        Ok(decode_permissions(entries.unwrap_or_default()))
    }

    async fn write_permission(
        &self,
        subject: &str,
        entity: &str,
        permissions: &PermissionSet,
    ) -> AppResult<()> {
        let url = self.endpoint(&["acl", subject, entity])?;
        let body = PermissionsBody {
            permissions: permissions
                .iter()
                .map(|(permission, enabled)| (permission.as_str(), enabled))
                .collect::<BTreeMap<_, _>>(),
        };

        self.send(self.request(Method::PUT, url).json(&body)).await?;
        Ok(())
    }

    async fn reset_permission_to_default(&self, subject: &str, entity: &str) -> AppResult<()> {
        let url = self.endpoint(&["acl", subject, entity, "default"])?;
        self.send(self.request(Method::PUT, url)).await?;
        Ok(())
    }
}

/// Converts ACL rows to permission sets, skipping flags the console does not know.
pub(super) fn decode_permissions(entries: Vec<AclEntryBody>) -> SubjectPermissions {
    entries
        .into_iter()
        .map(|entry| {
            let permissions: PermissionSet = entry
                .permissions
                .into_iter()
                .filter_map(|(name, enabled)| match AclPermission::from_str(name.as_str()) {
                    Ok(permission) => Some((permission, enabled)),
                    Err(_) => {
                        warn!(entity = %entry.entity, permission = %name, "ignoring unknown acl permission");
                        None
                    }
                })
                .collect();
            (entry.entity, permissions)
        })
        .collect()
}
