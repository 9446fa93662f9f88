use std::collections::HashMap;
use std::sync::Arc;

use elysian_core::{AppError, AppResult};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Editing sessions of one kind, keyed by a server-issued id.
///
/// The map lock is only held to look sessions up. Each session carries its own
/// lock, so a slow remote save on one session never blocks another.
pub struct SessionRegistry<T> {
    label: &'static str,
    sessions: Arc<Mutex<HashMap<Uuid, Arc<Mutex<T>>>>>,
}

impl<T> Clone for SessionRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<T> SessionRegistry<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn open(&self, session: T) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions
            .lock()
            .await
            .insert(session_id, Arc::new(Mutex::new(session)));
        session_id
    }

    pub async fn get(&self, session_id: Uuid) -> AppResult<Arc<Mutex<T>>> {
        self.sessions
            .lock()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("{} session '{session_id}' not found", self.label))
            })
    }

    pub async fn close(&self, session_id: Uuid) -> AppResult<()> {
        self.sessions
            .lock()
            .await
            .remove(&session_id)
            .map(|_| ())
            .ok_or_else(|| {
                AppError::NotFound(format!("{} session '{session_id}' not found", self.label))
            })
    }
}
