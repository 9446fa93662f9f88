use async_trait::async_trait;

use elysian_application::UserRepository;
use elysian_core::{AppError, AppResult};
use elysian_domain::{ConsoleUser, NewUser, Role};

use super::{InMemoryElysianStore, StoredUser};

fn missing_user(username: &str) -> AppError {
    AppError::NotFound(format!("user '{username}' does not exist"))
}

#[async_trait]
impl UserRepository for InMemoryElysianStore {
    async fn list_users(&self) -> AppResult<Vec<ConsoleUser>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .map(|(username, user)| ConsoleUser {
                username: username.clone(),
                role: user.role,
            })
            .collect())
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<()> {
        let mut users = self.users.write().await;
        let username = user.username().as_str();
        if users.contains_key(username) {
            return Err(AppError::Conflict(format!(
                "user '{username}' already exists"
            )));
        }

        users.insert(
            username.to_owned(),
            StoredUser {
                role: user.role(),
                password: user.password().to_owned(),
            },
        );
        Ok(())
    }

    async fn change_user_role(&self, username: &str, role: Role) -> AppResult<()> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(username)
            .ok_or_else(|| missing_user(username))?;

        stored.role = role;
        Ok(())
    }

    async fn change_user_password(&self, username: &str, password: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(username)
            .ok_or_else(|| missing_user(username))?;

        password.clone_into(&mut stored.password);
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> AppResult<()> {
        if self.users.write().await.remove(username).is_none() {
            return Err(missing_user(username));
        }

        self.permissions
            .write()
            .await
            .retain(|(subject, _), _| subject != username);
        Ok(())
    }
}
