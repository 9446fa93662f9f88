//! JSON shapes exchanged with the admin API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use elysian_domain::{FieldMap, NewUser};

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub(super) error: String,
}

/// `GET /api/entity/types`: every schema encoded as a JSON string.
#[derive(Debug, Deserialize)]
pub(super) struct EntityTypesBody {
    #[serde(default)]
    pub(super) entities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EntityTypeHeader {
    pub(super) id: String,
    #[serde(rename = "_manual", default)]
    pub(super) manual: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(super) struct FieldsBody<'a> {
    pub(super) fields: &'a FieldMap,
}

#[derive(Debug, Deserialize)]
pub(super) struct AclEntryBody {
    pub(super) entity: String,
    #[serde(default)]
    pub(super) permissions: BTreeMap<String, bool>,
}

#[derive(Debug, Serialize)]
pub(super) struct PermissionsBody {
    pub(super) permissions: BTreeMap<&'static str, bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersBody {
    #[serde(default)]
    pub(super) users: Option<Vec<UserEntryBody>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEntryBody {
    pub(super) username: String,
    pub(super) role: String,
}

#[derive(Debug, Serialize)]
pub(super) struct RoleBody {
    pub(super) role: &'static str,
}

/// `POST /api/security/user`.
#[derive(Debug, Serialize)]
pub(super) struct NewUserBody<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
    pub(super) role: &'static str,
}

impl<'a> From<&'a NewUser> for NewUserBody<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            username: user.username().as_str(),
            password: user.password(),
            role: user.role().as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordBody<'a> {
    pub(super) password: &'a str,
}
