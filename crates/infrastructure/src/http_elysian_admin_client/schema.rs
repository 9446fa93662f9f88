use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use elysian_application::{EntityTypeSummary, SchemaRepository};
use elysian_core::{AppError, AppResult};
use elysian_domain::{FieldMap, SchemaTree};

use super::HttpElysianAdminClient;
use super::wire::{EntityTypeHeader, EntityTypesBody, FieldsBody};

#[async_trait]
impl SchemaRepository for HttpElysianAdminClient {
    async fn list_entity_types(&self) -> AppResult<Vec<EntityTypeSummary>> {
        let url = self.endpoint(&["entity", "types"])?;
        let body: EntityTypesBody = self.send_json(self.request(Method::GET, url)).await?;

        decode_entity_types(body)
    }

    async fn load_schema(&self, entity_id: &str) -> AppResult<SchemaTree> {
        let url = self.endpoint(&[entity_id, "schema"])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn replace_schema(&self, entity_id: &str, fields: &FieldMap) -> AppResult<()> {
        let url = self.endpoint(&[entity_id, "schema"])?;
        self.send(self.request(Method::PUT, url).json(&FieldsBody { fields }))
            .await?;
        Ok(())
    }

    async fn create_entity_type(&self, entity_id: &str) -> AppResult<()> {
        let url = self.endpoint(&[entity_id, "create"])?;
        self.send(
            self.request(Method::POST, url)
                .json(&json!({ "fields": {} })),
        )
        .await?;
        Ok(())
    }

    async fn drop_entity_type(&self, entity_id: &str) -> AppResult<()> {
        let url = self.endpoint(&[entity_id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

pub(super) fn decode_entity_types(body: EntityTypesBody) -> AppResult<Vec<EntityTypeSummary>> {
    body.entities
        .unwrap_or_default()
        .iter()
        .map(|encoded| {
            let header: EntityTypeHeader = serde_json::from_str(encoded).map_err(|error| {
                AppError::Internal(format!("invalid entity type payload: {error}"))
            })?;

            Ok(EntityTypeSummary {
                entity_id: header.id,
                is_manually_managed: header.manual.unwrap_or(false),
            })
        })
        .collect()
}
