use std::sync::Arc;

use tracing::{info, warn};

use elysian_core::{AppError, AppResult};
use elysian_domain::{ConsoleUser, NewUser, Role, validate_password};

use crate::admin_ports::UserRepository;
use crate::role_field::RoleField;
use crate::search::filter_by_query;

#[cfg(test)]
mod tests;

/// Application service for the user list and user administration.
#[derive(Clone)]
pub struct UserAdminService {
    repository: Arc<dyn UserRepository>,
}

impl UserAdminService {
    /// Creates a new service from a user repository.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Lists users whose name matches `query`, sorted by username.
    pub async fn list_users(&self, query: &str) -> AppResult<Vec<ConsoleUser>> {
        let mut users = self.repository.list_users().await?;
        users.sort_by(|left, right| left.username.cmp(&right.username));
        Ok(filter_by_query(users, query, |user| user.username.as_str()))
    }

    /// Finds one user by exact username.
    pub async fn find_user(&self, username: &str) -> AppResult<ConsoleUser> {
        self.repository
            .list_users()
            .await?
            .into_iter()
            .find(|user| user.username == username)
            .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))
    }

    /// Creates a user and returns it as it will be listed.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> AppResult<ConsoleUser> {
        let user = NewUser::new(username, password, role)?;
        self.repository.create_user(&user).await?;

        info!(username = %user.username(), role = %role, "user created");
        Ok(ConsoleUser {
            username: user.username().to_string(),
            role,
        })
    }

    /// Replaces the password of a user.
    pub async fn change_password(&self, username: &str, password: &str) -> AppResult<()> {
        let password = validate_password(password)?;
        self.repository
            .change_user_password(username, password.as_str())
            .await?;

        info!(username = username, "user password changed");
        Ok(())
    }

    /// Deletes a user. The database drops the user's ACL entries with it.
    pub async fn delete_user(&self, username: &str) -> AppResult<()> {
        self.repository.delete_user(username).await?;

        info!(username = username, "user deleted");
        Ok(())
    }

    /// Applies a role change optimistically through `field`.
    ///
    /// The field shows the requested role while the call runs and rolls back
    /// when the server rejects it.
    pub async fn change_role(
        &self,
        username: &str,
        field: &mut RoleField,
        role: Role,
    ) -> AppResult<Role> {
        if !field.request(role)? {
            return Ok(field.committed());
        }

        match self.repository.change_user_role(username, role).await {
            Ok(()) => {
                field.commit();
                info!(username = username, role = %role, "user role changed");
                Ok(field.committed())
            }
            Err(error) => {
                let restored = field.rollback();
                warn!(
                    username = username,
                    role = %role,
                    restored = %restored,
                    error = %error,
                    "user role change failed"
                );
                Err(error)
            }
        }
    }
}
