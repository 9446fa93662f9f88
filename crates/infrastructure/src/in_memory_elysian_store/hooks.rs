use async_trait::async_trait;
use uuid::Uuid;

use elysian_application::HookRepository;
use elysian_core::{AppError, AppResult};
use elysian_domain::{Hook, NewHook};

use super::InMemoryElysianStore;

#[async_trait]
impl HookRepository for InMemoryElysianStore {
    async fn list_hooks_for_entity(&self, entity: &str) -> AppResult<Vec<Hook>> {
        Ok(self
            .hooks
            .read()
            .await
            .values()
            .filter(|hook| hook.entity == entity)
            .cloned()
            .collect())
    }

    async fn load_hook(&self, hook_id: &str) -> AppResult<Hook> {
        self.hooks
            .read()
            .await
            .get(hook_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("hook '{hook_id}' does not exist")))
    }

    async fn save_hook(&self, hook: &Hook) -> AppResult<()> {
        let mut hooks = self.hooks.write().await;
        let Some(stored) = hooks.get_mut(hook.id.as_str()) else {
            return Err(AppError::NotFound(format!(
                "hook '{}' does not exist",
                hook.id
            )));
        };

        *stored = hook.clone();
        Ok(())
    }

    async fn create_hook(&self, hook: NewHook) -> AppResult<Hook> {
        self.require_entity(hook.entity().as_str()).await?;

        let hook = hook.into_hook(Uuid::new_v4().to_string());
        self.hooks
            .write()
            .await
            .insert(hook.id.clone(), hook.clone());
        Ok(hook)
    }

    async fn delete_hook(&self, hook_id: &str) -> AppResult<()> {
        self.hooks
            .write()
            .await
            .remove(hook_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("hook '{hook_id}' does not exist")))
    }
}
