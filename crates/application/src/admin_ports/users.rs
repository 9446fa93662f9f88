use async_trait::async_trait;

use elysian_core::AppResult;
use elysian_domain::{ConsoleUser, NewUser, Role};

/// Repository port for database users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists every database user with its role.
    async fn list_users(&self) -> AppResult<Vec<ConsoleUser>>;

    /// Creates a user.
    async fn create_user(&self, user: &NewUser) -> AppResult<()>;

    /// Changes the role of one user.
    async fn change_user_role(&self, username: &str, role: Role) -> AppResult<()>;

    /// Replaces the password of one user.
    async fn change_user_password(&self, username: &str, password: &str) -> AppResult<()>;

    /// Deletes one user together with its ACL entries.
    async fn delete_user(&self, username: &str) -> AppResult<()>;
}
