//! Database users as seen by the console.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use elysian_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Role granted to a database user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including ACL and hook administration.
    Admin,
    /// Access restricted by per-entity ACLs.
    User,
}

impl Role {
    /// Returns the wire value for the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// A database user listed in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleUser {
    /// Login name, unique per database.
    pub username: String,
    /// Granted role.
    pub role: Role,
}

/// Input for creating a database user.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    username: NonEmptyString,
    password: NonEmptyString,
    role: Role,
}

impl NewUser {
    /// Validates a new user. Usernames are trimmed; passwords are kept verbatim.
    pub fn new(username: &str, password: &str, role: Role) -> AppResult<Self> {
        Ok(Self {
            username: NonEmptyString::new(username.trim())
                .map_err(|_| AppError::Validation("username is required".to_owned()))?,
            password: validate_password(password)?,
            role,
        })
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &NonEmptyString {
        &self.username
    }

    /// Returns the plain-text password sent to the database.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Checks that a password is not blank.
pub fn validate_password(password: &str) -> AppResult<NonEmptyString> {
    NonEmptyString::new(password)
        .map_err(|_| AppError::Validation("password must not be blank".to_owned()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{NewUser, Role};

    #[test]
    fn role_roundtrip_wire_value() {
        for role in [Role::Admin, Role::User] {
            assert_eq!(Role::from_str(role.as_str()).ok(), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("root").is_err());
    }

    #[test]
    fn new_user_requires_name_and_password() {
        assert!(NewUser::new("  ", "secret", Role::User).is_err());
        assert!(NewUser::new("jane", " ", Role::User).is_err());

        let user = NewUser::new(" jane ", "s3cret", Role::Admin).unwrap_or_else(|_| unreachable!());
        assert_eq!(user.username().as_str(), "jane");
        assert_eq!(user.password(), "s3cret");
        assert!(!format!("{user:?}").contains("s3cret"));
    }
}
