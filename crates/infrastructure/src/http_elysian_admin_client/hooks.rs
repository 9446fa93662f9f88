use async_trait::async_trait;
use reqwest::Method;
use uuid::Uuid;

use elysian_application::HookRepository;
use elysian_core::AppResult;
use elysian_domain::{Hook, NewHook};

use super::HttpElysianAdminClient;

#[async_trait]
impl HookRepository for HttpElysianAdminClient {
    async fn list_hooks_for_entity(&self, entity: &str) -> AppResult<Vec<Hook>> {
        let url = self.endpoint(&["hook", entity])?;
        let hooks: Option<Vec<Hook>> = self.send_json(self.request(Method::GET, url)).await?;
        Ok(hooks.unwrap_or_default())
    }

    async fn load_hook(&self, hook_id: &str) -> AppResult<Hook> {
        let url = self.endpoint(&["hook", "id", hook_id])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn save_hook(&self, hook: &Hook) -> AppResult<()> {
        let url = self.endpoint(&["hook", "id", hook.id.as_str()])?;
        self.send(self.request(Method::PUT, url).json(hook)).await?;
        Ok(())
    }

    async fn create_hook(&self, hook: NewHook) -> AppResult<Hook> {
        // The create endpoint does not echo a server-assigned id, so the
        // console picks it.
        let hook = hook.into_hook(Uuid::new_v4().to_string());
        let url = self.endpoint(&["hook", hook.entity.as_str()])?;
        self.send(self.request(Method::POST, url).json(&hook)).await?;
        Ok(hook)
    }

    async fn delete_hook(&self, hook_id: &str) -> AppResult<()> {
        let url = self.endpoint(&["hook", "id", hook_id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
