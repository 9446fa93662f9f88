use serde_json::json;

use elysian_application::{
    AclRepository, HookRepository, RecordRepository, SchemaRepository, UserRepository,
};
use elysian_core::AppError;
use elysian_domain::{
    AclPermission, FieldMap, FieldNode, FieldType, HookEvent, NewHook, NewUser, PermissionSet,
    RecordQuery, Role, record_id,
};

use super::InMemoryElysianStore;

async fn seeded() -> InMemoryElysianStore {
    InMemoryElysianStore::seeded()
        .await
        .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn seeded_store_lists_entity_types() {
    let store = seeded().await;

    let listed = store.list_entity_types().await.unwrap_or_default();

    let ids: Vec<&str> = listed.iter().map(|summary| summary.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["invoices", "orders"]);
    assert!(listed[1].is_manually_managed);
}

#[tokio::test]
async fn replace_schema_stores_normalized_mapping() {
    let store = seeded().await;
    let fields: FieldMap = [(
        "total".to_owned(),
        FieldNode::new("total", FieldType::Number, false),
    )]
    .into_iter()
    .collect();

    assert!(store.replace_schema("invoices", &fields).await.is_ok());

    let schema = store
        .load_schema("invoices")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(schema.fields(), &fields);
    assert!(schema.is_manually_managed());

    let mismatched: FieldMap = [(
        "amount".to_owned(),
        FieldNode::new("total", FieldType::Number, false),
    )]
    .into_iter()
    .collect();
    assert!(matches!(
        store.replace_schema("invoices", &mismatched).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn entity_type_lifecycle() {
    let store = seeded().await;

    assert!(store.create_entity_type("customers").await.is_ok());
    assert!(matches!(
        store.create_entity_type("customers").await,
        Err(AppError::Conflict(_))
    ));
    assert!(store.drop_entity_type("orders").await.is_ok());

    let hooks = store.list_hooks_for_entity("orders").await.unwrap_or_default();
    assert!(hooks.is_empty());
    assert!(matches!(
        store.drop_entity_type("orders").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn permissions_default_by_role_until_written() {
    let store = seeded().await;

    let row = store
        .load_permissions_for_subject("alice")
        .await
        .unwrap_or_default();
    assert_eq!(
        row.get("orders"),
        Some(&PermissionSet::default_for_role(Role::User))
    );

    let granted = PermissionSet::default_for_role(Role::User).with(AclPermission::Read, true);
    assert!(
        store
            .write_permission("alice", "orders", &granted)
            .await
            .is_ok()
    );
    let row = store
        .load_permissions_for_subject("alice")
        .await
        .unwrap_or_default();
    assert_eq!(row.get("orders"), Some(&granted));

    assert!(
        store
            .reset_permission_to_default("alice", "orders")
            .await
            .is_ok()
    );
    let row = store
        .load_permissions_for_subject("alice")
        .await
        .unwrap_or_default();
    assert_eq!(
        row.get("orders"),
        Some(&PermissionSet::default_for_role(Role::User))
    );
}

#[tokio::test]
async fn injected_failure_rejects_writes_for_entity() {
    let store = seeded().await;
    store.fail_permission_writes_for("invoices").await;
    let permissions = PermissionSet::all_disabled();

    assert!(matches!(
        store.write_permission("alice", "invoices", &permissions).await,
        Err(AppError::Internal(_))
    ));
    assert!(
        store
            .write_permission("alice", "orders", &permissions)
            .await
            .is_ok()
    );
    assert!(matches!(
        store.load_permissions_for_subject("nobody").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn hooks_round_trip_through_store() {
    let store = seeded().await;
    let new_hook = NewHook::new("invoices", HookEvent::PreRead, "only paid")
        .unwrap_or_else(|_| unreachable!());

    let mut created = store
        .create_hook(new_hook)
        .await
        .unwrap_or_else(|_| unreachable!());
    created.enabled = true;
    assert!(store.save_hook(&created).await.is_ok());

    let loaded = store.load_hook(created.id.as_str()).await.ok();
    assert_eq!(loaded, Some(created.clone()));

    assert!(store.delete_hook(created.id.as_str()).await.is_ok());
    assert!(matches!(
        store.save_hook(&created).await,
        Err(AppError::NotFound(_))
    ));

    let orphan = NewHook::new("ghosts", HookEvent::PreRead, "boo")
        .unwrap_or_else(|_| unreachable!());
    assert!(matches!(
        store.create_hook(orphan).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn role_change_updates_user() {
    let store = seeded().await;

    assert!(store.change_user_role("alice", Role::Admin).await.is_ok());
    let users = store.list_users().await.unwrap_or_default();
    assert!(
        users
            .iter()
            .any(|user| user.username == "alice" && user.role == Role::Admin)
    );
    assert!(matches!(
        store.change_user_role("carol", Role::User).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn created_user_gets_password_and_duplicate_conflicts() {
    let store = seeded().await;
    let carol = NewUser::new("carol", "hunter2", Role::User).unwrap_or_else(|_| unreachable!());

    assert!(store.create_user(&carol).await.is_ok());
    assert!(matches!(
        store.create_user(&carol).await,
        Err(AppError::Conflict(_))
    ));
    assert!(store.change_user_password("carol", "n3w").await.is_ok());

    let password = store
        .users
        .read()
        .await
        .get("carol")
        .map(|user| user.password.clone());
    assert_eq!(password.as_deref(), Some("n3w"));
    assert!(matches!(
        store.change_user_password("dave", "x").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn deleting_user_drops_its_permissions() {
    let store = seeded().await;
    let granted = [(AclPermission::Read, true)].into_iter().collect::<PermissionSet>();
    assert!(store.write_permission("alice", "orders", &granted).await.is_ok());

    assert!(store.delete_user("alice").await.is_ok());

    assert!(store.permissions.read().await.is_empty());
    assert!(
        store
            .list_users()
            .await
            .unwrap_or_default()
            .iter()
            .all(|user| user.username != "alice")
    );
    assert!(matches!(
        store.delete_user("alice").await,
        Err(AppError::NotFound(_))
    ));
}

fn ids(records: &[elysian_domain::RecordDocument]) -> Vec<&str> {
    records.iter().filter_map(record_id).collect()
}

#[tokio::test]
async fn record_query_filters_sorts_and_pages() {
    let store = seeded().await;
    let query = RecordQuery::from_value(json!({
        "entity": "orders",
        "filters": { "status": { "eq": "paid" } },
        "sorts": { "total": "desc" }
    }))
    .unwrap_or_else(|_| unreachable!());

    let paid = store.query_records(&query).await.unwrap_or_default();
    assert_eq!(ids(&paid), vec!["o-1", "o-3"]);

    let query = RecordQuery::from_value(json!({
        "entity": "orders",
        "offset": 1,
        "limit": 1,
        "filters": { "or": [{ "total": { "lt": "50" } }, { "id": { "eq": "o-1" } }] },
        "sorts": { "id": "asc" },
        "fields": "id"
    }))
    .unwrap_or_else(|_| unreachable!());

    let page = store.query_records(&query).await.unwrap_or_default();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].get("id"), Some(&json!("o-2")));
    assert!(page[0].get("total").is_none());
}

#[tokio::test]
async fn record_delete_removes_one_record() {
    let store = seeded().await;

    assert!(store.delete_record("orders", "o-2").await.is_ok());
    assert!(matches!(
        store.delete_record("orders", "o-2").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_record("ghosts", "o-1").await,
        Err(AppError::NotFound(_))
    ));

    let query = RecordQuery::new("orders").unwrap_or_else(|_| unreachable!());
    let remaining = store.query_records(&query).await.unwrap_or_default();
    assert_eq!(ids(&remaining), vec!["o-1", "o-3"]);
}
