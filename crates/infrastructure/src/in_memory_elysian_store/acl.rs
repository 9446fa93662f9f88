use async_trait::async_trait;

use elysian_application::{AclRepository, SubjectPermissions};
use elysian_core::{AppError, AppResult};
use elysian_domain::PermissionSet;

use super::InMemoryElysianStore;

impl InMemoryElysianStore {
    async fn check_injected_failure(&self, entity: &str) -> AppResult<()> {
        if self.failing_entities.read().await.contains(entity) {
            return Err(AppError::Internal(format!(
                "unable to update acl for entity '{entity}'"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl AclRepository for InMemoryElysianStore {
    async fn list_entity_names(&self) -> AppResult<Vec<String>> {
        Ok(self.schemas.read().await.keys().cloned().collect())
    }

    async fn load_permissions_for_subject(&self, subject: &str) -> AppResult<SubjectPermissions> {
        let role = self.require_role(subject).await?;
        let stored = self.permissions.read().await;

        Ok(self
            .schemas
            .read()
            .await
            .keys()
            .map(|entity| {
                let permissions = stored
                    .get(&(subject.to_owned(), entity.clone()))
                    .cloned()
                    .unwrap_or_else(|| PermissionSet::default_for_role(role));
                (entity.clone(), permissions)
            })
            .collect())
    }

    async fn write_permission(
        &self,
        subject: &str,
        entity: &str,
        permissions: &PermissionSet,
    ) -> AppResult<()> {
        self.require_role(subject).await?;
        self.require_entity(entity).await?;
        self.check_injected_failure(entity).await?;

        self.permissions
            .write()
            .await
            .insert((subject.to_owned(), entity.to_owned()), permissions.clone());
        Ok(())
    }

    async fn reset_permission_to_default(&self, subject: &str, entity: &str) -> AppResult<()> {
        let role = self.require_role(subject).await?;
        self.require_entity(entity).await?;
        self.check_injected_failure(entity).await?;

        self.permissions.write().await.insert(
            (subject.to_owned(), entity.to_owned()),
            PermissionSet::default_for_role(role),
        );
        Ok(())
    }
}
