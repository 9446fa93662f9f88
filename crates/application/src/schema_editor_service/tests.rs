use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use elysian_core::{AppError, AppResult};
use elysian_domain::{FieldMap, FieldNode, FieldPath, FieldType, SchemaTree};

use crate::admin_ports::{EntityTypeSummary, SchemaRepository};

use super::SchemaEditorService;

#[derive(Default)]
struct FakeSchemaRepository {
    schemas: Mutex<BTreeMap<String, FieldMap>>,
    replace_calls: Mutex<Vec<(String, FieldMap)>>,
    fail_replace: bool,
}

impl FakeSchemaRepository {
    fn with_orders() -> Self {
        let fields: FieldMap = [(
            "status".to_owned(),
            FieldNode::new("status", FieldType::String, true),
        )]
        .into_iter()
        .collect();

        Self {
            schemas: Mutex::new(BTreeMap::from([("orders".to_owned(), fields)])),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SchemaRepository for FakeSchemaRepository {
    async fn list_entity_types(&self) -> AppResult<Vec<EntityTypeSummary>> {
        Ok(self
            .schemas
            .lock()
            .await
            .keys()
            .rev()
            .map(|entity_id| EntityTypeSummary {
                entity_id: entity_id.clone(),
                is_manually_managed: false,
            })
            .collect())
    }

    async fn load_schema(&self, entity_id: &str) -> AppResult<SchemaTree> {
        let fields = self
            .schemas
            .lock()
            .await
            .get(entity_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("entity '{entity_id}' not found")))?;
        SchemaTree::new(entity_id, true, fields)
    }

    async fn replace_schema(&self, entity_id: &str, fields: &FieldMap) -> AppResult<()> {
        self.replace_calls
            .lock()
            .await
            .push((entity_id.to_owned(), fields.clone()));
        if self.fail_replace {
            return Err(AppError::Internal("database unavailable".to_owned()));
        }

        self.schemas
            .lock()
            .await
            .insert(entity_id.to_owned(), fields.clone());
        Ok(())
    }

    async fn create_entity_type(&self, entity_id: &str) -> AppResult<()> {
        self.schemas
            .lock()
            .await
            .insert(entity_id.to_owned(), FieldMap::new());
        Ok(())
    }

    async fn drop_entity_type(&self, entity_id: &str) -> AppResult<()> {
        self.schemas.lock().await.remove(entity_id);
        Ok(())
    }
}

#[tokio::test]
async fn save_sends_single_replace_and_reloads_baseline() {
    let repository = Arc::new(FakeSchemaRepository::with_orders());
    let service = SchemaEditorService::new(repository.clone());

    let mut editor = service
        .open_editor("orders")
        .await
        .unwrap_or_else(|_| unreachable!());
    let added = editor
        .add_child(&FieldPath::root())
        .unwrap_or_else(|_| unreachable!());

    let result = service.save(&mut editor).await;

    assert!(result.is_ok());
    assert!(!editor.has_unsaved_changes());
    assert!(editor.baseline().fields().contains_key(&added));

    let calls = repository.replace_calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "orders");
    assert_eq!(calls[0].1.len(), 2);
}

#[tokio::test]
async fn failed_save_keeps_in_progress_tree() {
    let repository = Arc::new(FakeSchemaRepository {
        fail_replace: true,
        ..FakeSchemaRepository::with_orders()
    });
    let service = SchemaEditorService::new(repository);

    let mut editor = service
        .open_editor("orders")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(editor.delete_field(&FieldPath::root(), "status").is_ok());
    let before = editor.clone();

    let result = service.save(&mut editor).await;

    assert!(matches!(result, Err(AppError::Internal(_))));
    assert_eq!(editor, before);
    assert!(editor.has_unsaved_changes());
}

#[tokio::test]
async fn entity_types_are_validated_and_sorted() {
    let repository = Arc::new(FakeSchemaRepository::with_orders());
    let service = SchemaEditorService::new(repository);

    assert!(matches!(
        service.create_entity_type("   ").await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.create_entity_type("line items").await,
        Err(AppError::Validation(_))
    ));
    assert!(service.create_entity_type(" invoices ").await.is_ok());

    let listed: Vec<String> = service
        .list_entity_types()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|summary| summary.entity_id)
        .collect();
    assert_eq!(listed, vec!["invoices".to_owned(), "orders".to_owned()]);

    assert!(service.drop_entity_type("invoices").await.is_ok());
    assert!(matches!(
        service.open_editor("invoices").await,
        Err(AppError::NotFound(_))
    ));
}
