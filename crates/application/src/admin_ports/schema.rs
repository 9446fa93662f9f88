use async_trait::async_trait;

use elysian_core::AppResult;
use elysian_domain::{FieldMap, SchemaTree};

/// Entity type listed in the schema browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeSummary {
    /// Entity identifier.
    pub entity_id: String,
    /// Whether the schema was authored manually rather than inferred from records.
    pub is_manually_managed: bool,
}

/// Repository port for entity types and their schemas.
#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// Lists every entity type known to the database.
    async fn list_entity_types(&self) -> AppResult<Vec<EntityTypeSummary>>;

    /// Loads the schema of one entity type.
    async fn load_schema(&self, entity_id: &str) -> AppResult<SchemaTree>;

    /// Replaces the whole top-level field mapping of an entity type.
    async fn replace_schema(&self, entity_id: &str, fields: &FieldMap) -> AppResult<()>;

    /// Creates an entity type with an empty field set.
    async fn create_entity_type(&self, entity_id: &str) -> AppResult<()>;

    /// Drops an entity type and its records.
    async fn drop_entity_type(&self, entity_id: &str) -> AppResult<()>;
}
