use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use elysian_core::{AppError, AppResult};
use elysian_domain::{ConsoleUser, NewUser, Role};

use crate::admin_ports::UserRepository;
use crate::role_field::RoleField;

use super::UserAdminService;

struct FakeUserRepository {
    users: Mutex<Vec<ConsoleUser>>,
    passwords: Mutex<Vec<(String, String)>>,
    reject_role_changes: bool,
}

impl FakeUserRepository {
    fn new(reject_role_changes: bool) -> Self {
        Self {
            users: Mutex::new(vec![
                ConsoleUser {
                    username: "bob".to_owned(),
                    role: Role::User,
                },
                ConsoleUser {
                    username: "Alice".to_owned(),
                    role: Role::Admin,
                },
                ConsoleUser {
                    username: "malice".to_owned(),
                    role: Role::User,
                },
            ]),
            passwords: Mutex::new(Vec::new()),
            reject_role_changes,
        }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn list_users(&self) -> AppResult<Vec<ConsoleUser>> {
        Ok(self.users.lock().await.clone())
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if users.iter().any(|existing| existing.username == user.username().as_str()) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                user.username()
            )));
        }

        users.push(ConsoleUser {
            username: user.username().to_string(),
            role: user.role(),
        });
        self.passwords
            .lock()
            .await
            .push((user.username().to_string(), user.password().to_owned()));
        Ok(())
    }

    async fn change_user_password(&self, username: &str, password: &str) -> AppResult<()> {
        if !self.users.lock().await.iter().any(|user| user.username == username) {
            return Err(AppError::NotFound(format!("user '{username}' not found")));
        }

        self.passwords
            .lock()
            .await
            .push((username.to_owned(), password.to_owned()));
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|user| user.username != username);
        if users.len() == before {
            return Err(AppError::NotFound(format!("user '{username}' not found")));
        }
        Ok(())
    }

    async fn change_user_role(&self, username: &str, role: Role) -> AppResult<()> {
        if self.reject_role_changes {
            return Err(AppError::Forbidden("cannot change role".to_owned()));
        }

        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;
        user.role = role;
        Ok(())
    }
}

#[tokio::test]
async fn list_users_filters_case_insensitively() {
    let service = UserAdminService::new(Arc::new(FakeUserRepository::new(false)));

    let users = service.list_users("ALICE").await.unwrap_or_default();

    let names: Vec<&str> = users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(names, vec!["Alice", "malice"]);
}

#[tokio::test]
async fn successful_role_change_commits() {
    let repository = Arc::new(FakeUserRepository::new(false));
    let service = UserAdminService::new(repository.clone());
    let mut field = RoleField::new(Role::User);

    let result = service.change_role("bob", &mut field, Role::Admin).await;

    assert_eq!(result, Ok(Role::Admin));
    assert_eq!(field.committed(), Role::Admin);
    let bob = service.find_user("bob").await.unwrap_or_else(|_| unreachable!());
    assert_eq!(bob.role, Role::Admin);
}

#[tokio::test]
async fn rejected_role_change_rolls_back() {
    let service = UserAdminService::new(Arc::new(FakeUserRepository::new(true)));
    let mut field = RoleField::new(Role::User);

    let result = service.change_role("bob", &mut field, Role::Admin).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(!field.is_pending());
    assert_eq!(field.displayed(), Role::User);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let service = UserAdminService::new(Arc::new(FakeUserRepository::new(false)));

    assert!(matches!(
        service.find_user("carol").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn created_user_is_listed_with_trimmed_name() {
    let repository = Arc::new(FakeUserRepository::new(false));
    let service = UserAdminService::new(repository.clone());

    let created = service.create_user(" carol ", "hunter2", Role::User).await;

    assert_eq!(
        created,
        Ok(ConsoleUser {
            username: "carol".to_owned(),
            role: Role::User,
        })
    );
    assert!(service.find_user("carol").await.is_ok());
    assert_eq!(
        *repository.passwords.lock().await,
        vec![("carol".to_owned(), "hunter2".to_owned())]
    );
}

#[tokio::test]
async fn blank_password_never_reaches_repository() {
    let repository = Arc::new(FakeUserRepository::new(false));
    let service = UserAdminService::new(repository.clone());

    let created = service.create_user("carol", "   ", Role::User).await;
    let changed = service.change_password("bob", "").await;

    assert!(matches!(created, Err(AppError::Validation(_))));
    assert!(matches!(changed, Err(AppError::Validation(_))));
    assert!(repository.passwords.lock().await.is_empty());
    assert!(service.find_user("carol").await.is_err());
}

#[tokio::test]
async fn password_change_and_delete_target_one_user() {
    let repository = Arc::new(FakeUserRepository::new(false));
    let service = UserAdminService::new(repository.clone());

    assert!(service.change_password("bob", "n3w").await.is_ok());
    assert!(service.delete_user("bob").await.is_ok());

    assert_eq!(
        *repository.passwords.lock().await,
        vec![("bob".to_owned(), "n3w".to_owned())]
    );
    assert!(matches!(
        service.find_user("bob").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_user("bob").await,
        Err(AppError::NotFound(_))
    ));
}
