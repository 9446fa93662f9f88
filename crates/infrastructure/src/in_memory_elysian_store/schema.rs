use async_trait::async_trait;

use elysian_application::{EntityTypeSummary, SchemaRepository};
use elysian_core::{AppError, AppResult};
use elysian_domain::{FieldMap, SchemaTree, validate_field_map};

use super::InMemoryElysianStore;

#[async_trait]
impl SchemaRepository for InMemoryElysianStore {
    async fn list_entity_types(&self) -> AppResult<Vec<EntityTypeSummary>> {
        Ok(self
            .schemas
            .read()
            .await
            .values()
            .map(|schema| EntityTypeSummary {
                entity_id: schema.entity_id().as_str().to_owned(),
                is_manually_managed: schema.is_manually_managed(),
            })
            .collect())
    }

    async fn load_schema(&self, entity_id: &str) -> AppResult<SchemaTree> {
        self.schemas
            .read()
            .await
            .get(entity_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("entity '{entity_id}' does not exist")))
    }

    async fn replace_schema(&self, entity_id: &str, fields: &FieldMap) -> AppResult<()> {
        validate_field_map(fields)?;

        let mut schemas = self.schemas.write().await;
        if !schemas.contains_key(entity_id) {
            return Err(AppError::NotFound(format!(
                "entity '{entity_id}' does not exist"
            )));
        }

        schemas.insert(
            entity_id.to_owned(),
            SchemaTree::new(entity_id, true, fields.clone())?,
        );
        Ok(())
    }

    async fn create_entity_type(&self, entity_id: &str) -> AppResult<()> {
        let mut schemas = self.schemas.write().await;
        if schemas.contains_key(entity_id) {
            return Err(AppError::Conflict(format!(
                "entity '{entity_id}' already exists"
            )));
        }

        schemas.insert(
            entity_id.to_owned(),
            SchemaTree::new(entity_id, false, FieldMap::new())?,
        );
        Ok(())
    }

    async fn drop_entity_type(&self, entity_id: &str) -> AppResult<()> {
        if self.schemas.write().await.remove(entity_id).is_none() {
            return Err(AppError::NotFound(format!(
                "entity '{entity_id}' does not exist"
            )));
        }

        self.permissions
            .write()
            .await
            .retain(|(_, entity), _| entity != entity_id);
        self.hooks
            .write()
            .await
            .retain(|_, hook| hook.entity != entity_id);
        self.records.write().await.remove(entity_id);
        Ok(())
    }
}
