use std::sync::Arc;

use tracing::{info, warn};

use elysian_core::{AppError, AppResult, NonEmptyString};

use crate::admin_ports::{EntityTypeSummary, SchemaRepository};
use crate::schema_editor::SchemaEditor;

#[cfg(test)]
mod tests;

/// Application service that loads schemas into editors and commits them.
#[derive(Clone)]
pub struct SchemaEditorService {
    repository: Arc<dyn SchemaRepository>,
}

impl SchemaEditorService {
    /// Creates a new service from a schema repository.
    #[must_use]
    pub fn new(repository: Arc<dyn SchemaRepository>) -> Self {
        Self { repository }
    }

    /// Lists entity types sorted by identifier.
    pub async fn list_entity_types(&self) -> AppResult<Vec<EntityTypeSummary>> {
        let mut entity_types = self.repository.list_entity_types().await?;
        entity_types.sort_by(|left, right| left.entity_id.cmp(&right.entity_id));
        Ok(entity_types)
    }

    /// Creates an entity type with no fields.
    pub async fn create_entity_type(&self, entity_id: &str) -> AppResult<NonEmptyString> {
        let entity_id = validate_entity_id(entity_id)?;
        self.repository
            .create_entity_type(entity_id.as_str())
            .await?;

        info!(entity = %entity_id, "entity type created");
        Ok(entity_id)
    }

    /// Drops an entity type.
    pub async fn drop_entity_type(&self, entity_id: &str) -> AppResult<()> {
        let entity_id = validate_entity_id(entity_id)?;
        self.repository.drop_entity_type(entity_id.as_str()).await?;

        info!(entity = %entity_id, "entity type dropped");
        Ok(())
    }

    /// Loads an entity schema into a fresh editing session.
    pub async fn open_editor(&self, entity_id: &str) -> AppResult<SchemaEditor> {
        let entity_id = validate_entity_id(entity_id)?;
        let schema = self.repository.load_schema(entity_id.as_str()).await?;
        Ok(SchemaEditor::new(schema))
    }

    /// Replaces the stored schema with the editor's mapping and reloads the baseline.
    ///
    /// A failed replace leaves the in-progress tree untouched.
    pub async fn save(&self, editor: &mut SchemaEditor) -> AppResult<()> {
        let fields = editor.commit_payload()?;
        let entity_id = editor.entity_id().clone();

        if let Err(error) = self
            .repository
            .replace_schema(entity_id.as_str(), &fields)
            .await
        {
            warn!(entity = %entity_id, error = %error, "schema replace failed");
            return Err(error);
        }

        match self.repository.load_schema(entity_id.as_str()).await {
            Ok(schema) => editor.rebase(schema),
            Err(error) => {
                warn!(
                    entity = %entity_id,
                    error = %error,
                    "schema reload after save failed, keeping the saved mapping as baseline"
                );
                let saved = editor.baseline().clone().with_fields(fields);
                editor.rebase(saved);
            }
        }

        info!(entity = %entity_id, "schema saved");
        Ok(())
    }
}

fn validate_entity_id(entity_id: &str) -> AppResult<NonEmptyString> {
    let entity_id = NonEmptyString::new(entity_id.trim())?;
    if entity_id
        .as_str()
        .chars()
        .any(|character| character == '/' || character.is_whitespace())
    {
        return Err(AppError::Validation(format!(
            "entity id '{entity_id}' must not contain '/' or whitespace"
        )));
    }

    Ok(entity_id)
}
