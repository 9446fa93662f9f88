use std::cmp::Reverse;
use std::sync::Arc;

use tracing::{info, warn};

use elysian_core::{AppError, AppResult};
use elysian_domain::{Hook, HookEvent, NewHook};

use crate::admin_ports::HookRepository;
use crate::hook_form::HookFormSession;


/// Hooks of one event, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookGroup {
    /// Event shared by every hook in the group.
    pub event: HookEvent,
    /// Hooks ordered by descending priority, then by name.
    pub hooks: Vec<Hook>,
}

/// Application service for entity hooks and hook form sessions.
#[derive(Clone)]
pub struct HookService {
    repository: Arc<dyn HookRepository>,
}

impl HookService {
    /// Creates a new service from a hook repository.
    #[must_use]
    pub fn new(repository: Arc<dyn HookRepository>) -> Self {
        Self { repository }
    }

    /// Lists hooks of an entity grouped by event.
    ///
    /// Every event gets a group, empty or not, in lifecycle order.
    pub async fn list_hooks(&self, entity: &str) -> AppResult<Vec<HookGroup>> {
        let hooks = self.repository.list_hooks_for_entity(entity).await?;

        Ok(HookEvent::all()
            .iter()
            .map(|event| {
                let mut grouped: Vec<Hook> = hooks
                    .iter()
                    .filter(|hook| hook.event == *event)
                    .cloned()
                    .collect();
                grouped.sort_by(|left, right| {
                    (Reverse(left.priority), &left.name).cmp(&(Reverse(right.priority), &right.name))
                });

                HookGroup {
                    event: *event,
                    hooks: grouped,
                }
            })
            .collect())
    }

    /// Creates a disabled hook with an empty script.
    pub async fn create_hook(&self, entity: &str, event: HookEvent, name: &str) -> AppResult<Hook> {
        let new_hook = NewHook::new(entity, event, name)?;
        let hook = self.repository.create_hook(new_hook).await?;

        info!(hook_id = %hook.id, entity = %hook.entity, "hook created");
        Ok(hook)
    }

    /// Deletes a hook.
    pub async fn delete_hook(&self, hook_id: &str) -> AppResult<()> {
        if hook_id.trim().is_empty() {
            return Err(AppError::Validation("hook id must not be empty".to_owned()));
        }

        self.repository.delete_hook(hook_id).await?;
        info!(hook_id = hook_id, "hook deleted");
        Ok(())
    }

    /// Loads a hook into a fresh form session.
    pub async fn open_session(&self, hook_id: &str) -> AppResult<HookFormSession> {
        let hook = self.repository.load_hook(hook_id).await?;
        let mut session = HookFormSession::new();
        session.select(hook);
        Ok(session)
    }

    /// Persists a valid draft and reloads it.
    ///
    /// An invalid draft never reaches the repository. A failed save leaves the
    /// draft as it was.
    pub async fn save(&self, session: &mut HookFormSession) -> AppResult<Hook> {
        let draft = session.begin_save()?;

        if let Err(error) = self.repository.save_hook(&draft).await {
            session.abort_save();
            warn!(hook_id = %draft.id, error = %error, "hook save failed");
            return Err(error);
        }

        let saved = match self.repository.load_hook(draft.id.as_str()).await {
            Ok(reloaded) => reloaded,
            Err(error) => {
                warn!(
                    hook_id = %draft.id,
                    error = %error,
                    "hook reload after save failed, keeping the saved draft"
                );
                draft
            }
        };

        session.finish_save(saved.clone());
        info!(hook_id = %saved.id, "hook saved");
        Ok(saved)
    }
}
