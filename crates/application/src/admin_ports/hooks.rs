use async_trait::async_trait;

use elysian_core::AppResult;
use elysian_domain::{Hook, NewHook};

/// Repository port for entity read hooks.
#[async_trait]
pub trait HookRepository: Send + Sync {
    /// Lists hooks attached to an entity.
    async fn list_hooks_for_entity(&self, entity: &str) -> AppResult<Vec<Hook>>;

    /// Loads one hook by identifier.
    async fn load_hook(&self, hook_id: &str) -> AppResult<Hook>;

    /// Persists the full hook definition.
    async fn save_hook(&self, hook: &Hook) -> AppResult<()>;

    /// Creates a hook and returns it with its assigned identifier.
    async fn create_hook(&self, hook: NewHook) -> AppResult<Hook>;

    /// Deletes a hook.
    async fn delete_hook(&self, hook_id: &str) -> AppResult<()>;
}
