use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Method;

use elysian_application::UserRepository;
use elysian_core::{AppError, AppResult};
use elysian_domain::{ConsoleUser, NewUser, Role};

use super::HttpElysianAdminClient;
use super::wire::{NewUserBody, PasswordBody, RoleBody, UsersBody};

#[async_trait]
impl UserRepository for HttpElysianAdminClient {
    async fn list_users(&self) -> AppResult<Vec<ConsoleUser>> {
        let url = self.endpoint(&["security", "user"])?;
        let body: UsersBody = self.send_json(self.request(Method::GET, url)).await?;

        decode_users(body)
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<()> {
        let url = self.endpoint(&["security", "user"])?;
        self.send(self.request(Method::POST, url).json(&NewUserBody::from(user)))
            .await?;
        Ok(())
    }

    async fn change_user_role(&self, username: &str, role: Role) -> AppResult<()> {
        let url = self.endpoint(&["security", "user", username, "role"])?;
        self.send(
            self.request(Method::PUT, url)
                .json(&RoleBody { role: role.as_str() }),
        )
        .await?;
        Ok(())
    }

    async fn change_user_password(&self, username: &str, password: &str) -> AppResult<()> {
        let url = self.endpoint(&["security", "user", username, "password"])?;
        self.send(self.request(Method::PUT, url).json(&PasswordBody { password }))
            .await?;
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> AppResult<()> {
        let url = self.endpoint(&["security", "user", username])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

pub(super) fn decode_users(body: UsersBody) -> AppResult<Vec<ConsoleUser>> {
    body.users
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let role = Role::from_str(entry.role.as_str()).map_err(|_| {
                AppError::Internal(format!(
                    "user '{}' has unknown role '{}'",
                    entry.username, entry.role
                ))
            })?;

            Ok(ConsoleUser {
                username: entry.username,
                role,
            })
        })
        .collect()
}
