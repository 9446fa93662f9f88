use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::RwLock;

use elysian_core::{AppError, AppResult};
use elysian_domain::{
    FieldMap, FieldNode, FieldType, Hook, HookEvent, NewHook, PermissionSet, RecordDocument, Role,
    SchemaTree,
};
use serde_json::{Value, json};

mod acl;
mod hooks;
mod records;
mod schema;
mod users;

#[cfg(test)]
mod tests;

/// In-memory stand-in for an ElysianDB instance.
///
/// Used for local console runs and tests. Permission writes and resets can be
/// made to fail per entity to exercise partial bulk commits.
#[derive(Debug, Default)]
pub struct InMemoryElysianStore {
    schemas: RwLock<BTreeMap<String, SchemaTree>>,
    permissions: RwLock<BTreeMap<(String, String), PermissionSet>>,
    hooks: RwLock<BTreeMap<String, Hook>>,
    users: RwLock<BTreeMap<String, StoredUser>>,
    records: RwLock<BTreeMap<String, Vec<RecordDocument>>>,
    failing_entities: RwLock<BTreeSet<String>>,
}

#[derive(Debug, Clone)]
struct StoredUser {
    role: Role,
    password: String,
}

impl InMemoryElysianStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with a small demo dataset.
    pub async fn seeded() -> AppResult<Self> {
        let store = Self::new();
        store.insert_user("admin", Role::Admin).await;
        store.insert_user("alice", Role::User).await;

        let customer: FieldMap = [(
            "email".to_owned(),
            FieldNode::new("email", FieldType::String, true),
        )]
        .into_iter()
        .collect();
        let orders: FieldMap = [
            (
                "status".to_owned(),
                FieldNode::new("status", FieldType::String, true),
            ),
            (
                "customer".to_owned(),
                FieldNode::new("customer", FieldType::Object, false).with_children(customer),
            ),
        ]
        .into_iter()
        .collect();
        let invoices: FieldMap = [(
            "total".to_owned(),
            FieldNode::new("total", FieldType::Number, true),
        )]
        .into_iter()
        .collect();

        store
            .insert_schema(SchemaTree::new("orders", true, orders)?)
            .await;
        store
            .insert_schema(SchemaTree::new("invoices", false, invoices)?)
            .await;

        let mut hook = NewHook::new("orders", HookEvent::PostRead, "mask customer email")?
            .into_hook("hook-1");
        hook.script = "function postRead(ctx) {\n  return ctx.entity;\n}".to_owned();
        hook.priority = 10;
        store.insert_hook(hook).await;

        let order_rows = [("o-1", "paid", 120), ("o-2", "pending", 40), ("o-3", "paid", 75)];
        for (id, status, total) in order_rows {
            if let Value::Object(record) = json!({ "id": id, "status": status, "total": total }) {
                store.insert_record("orders", record).await;
            }
        }

        Ok(store)
    }

    /// Adds or replaces a user. The password starts out empty.
    pub async fn insert_user(&self, username: &str, role: Role) {
        self.users.write().await.insert(
            username.to_owned(),
            StoredUser {
                role,
                password: String::new(),
            },
        );
    }

    /// Appends a record to an entity.
    pub async fn insert_record(&self, entity: &str, record: RecordDocument) {
        self.records
            .write()
            .await
            .entry(entity.to_owned())
            .or_default()
            .push(record);
    }

    /// Adds or replaces an entity schema.
    pub async fn insert_schema(&self, schema: SchemaTree) {
        self.schemas
            .write()
            .await
            .insert(schema.entity_id().as_str().to_owned(), schema);
    }

    /// Adds or replaces a hook.
    pub async fn insert_hook(&self, hook: Hook) {
        self.hooks.write().await.insert(hook.id.clone(), hook);
    }

    /// Makes permission writes and resets on `entity` fail.
    pub async fn fail_permission_writes_for(&self, entity: &str) {
        self.failing_entities
            .write()
            .await
            .insert(entity.to_owned());
    }

    async fn require_entity(&self, entity: &str) -> AppResult<()> {
        if self.schemas.read().await.contains_key(entity) {
            return Ok(());
        }

        Err(AppError::NotFound(format!("entity '{entity}' does not exist")))
    }

    async fn require_role(&self, username: &str) -> AppResult<Role> {
        self.users
            .read()
            .await
            .get(username)
            .map(|user| user.role)
            .ok_or_else(|| AppError::NotFound(format!("user '{username}' does not exist")))
    }
}
