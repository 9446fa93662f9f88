use std::collections::BTreeMap;
use std::str::FromStr;

use elysian_core::AppError;
use serde::{Deserialize, Serialize};

use crate::Role;

/// Entity-level permissions enforced by the database ACL layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AclPermission {
    /// Allows reading all records of the entity.
    Read,
    /// Allows creating records in the entity.
    Create,
    /// Allows updating any record of the entity.
    Update,
    /// Allows deleting any record of the entity.
    Delete,
    /// Allows reading records owned by the subject.
    OwningRead,
    /// Allows creating records owned by the subject.
    OwningWrite,
    /// Allows updating records owned by the subject.
    OwningUpdate,
    /// Allows deleting records owned by the subject.
    OwningDelete,
}

impl AclPermission {
    /// Returns the wire value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::OwningRead => "owning_read",
            Self::OwningWrite => "owning_write",
            Self::OwningUpdate => "owning_update",
            Self::OwningDelete => "owning_delete",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AclPermission] = &[
            AclPermission::Read,
            AclPermission::Create,
            AclPermission::Update,
            AclPermission::Delete,
            AclPermission::OwningRead,
            AclPermission::OwningWrite,
            AclPermission::OwningUpdate,
            AclPermission::OwningDelete,
        ];

        ALL
    }

    /// Returns the operator-facing description shown next to the matrix.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Read => "Allows reading all records of the entity.",
            Self::Create => "Allows creating new records in the entity.",
            Self::Update => "Allows updating any record of the entity.",
            Self::Delete => "Allows deleting any record of the entity.",
            Self::OwningRead => "Allows reading only records owned by the user.",
            Self::OwningWrite => "Allows creating records owned by the user.",
            Self::OwningUpdate => "Allows updating only records owned by the user.",
            Self::OwningDelete => "Allows deleting only records owned by the user.",
        }
    }
}

impl FromStr for AclPermission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "owning_read" => Ok(Self::OwningRead),
            "owning_write" => Ok(Self::OwningWrite),
            "owning_update" => Ok(Self::OwningUpdate),
            "owning_delete" => Ok(Self::OwningDelete),
            _ => Err(AppError::Validation(format!(
                "unknown acl permission '{value}'"
            ))),
        }
    }
}

/// Flags granted to one subject on one entity.
///
/// Equality is structural: two sets are equal when they hold the same
/// permissions with the same flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<AclPermission, bool>);

impl PermissionSet {
    /// Creates a set with every known permission disabled.
    #[must_use]
    pub fn all_disabled() -> Self {
        Self(
            AclPermission::all()
                .iter()
                .map(|permission| (*permission, false))
                .collect(),
        )
    }

    /// Returns the set a fresh ACL entry grants to a role.
    ///
    /// Admins get every permission. Users only get the owning ones.
    #[must_use]
    pub fn default_for_role(role: Role) -> Self {
        AclPermission::all()
            .iter()
            .map(|permission| {
                let enabled = match role {
                    Role::Admin => true,
                    Role::User => matches!(
                        permission,
                        AclPermission::OwningRead
                            | AclPermission::OwningWrite
                            | AclPermission::OwningUpdate
                            | AclPermission::OwningDelete
                    ),
                };
                (*permission, enabled)
            })
            .collect()
    }

    /// Returns whether the permission is enabled. Missing entries count as disabled.
    #[must_use]
    pub fn is_enabled(&self, permission: AclPermission) -> bool {
        self.0.get(&permission).copied().unwrap_or(false)
    }

    /// Returns whether the permission has an explicit entry.
    #[must_use]
    pub fn contains(&self, permission: AclPermission) -> bool {
        self.0.contains_key(&permission)
    }

    /// Returns the set with one flag replaced.
    #[must_use]
    pub fn with(mut self, permission: AclPermission, enabled: bool) -> Self {
        self.0.insert(permission, enabled);
        self
    }

    /// Returns the set with one flag inverted.
    #[must_use]
    pub fn toggled(self, permission: AclPermission) -> Self {
        let enabled = self.is_enabled(permission);
        self.with(permission, !enabled)
    }

    /// Iterates over the explicit entries in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (AclPermission, bool)> + '_ {
        self.0.iter().map(|(permission, enabled)| (*permission, *enabled))
    }

    /// Returns the number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(AclPermission, bool)> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = (AclPermission, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::{AclPermission, PermissionSet};
    use crate::Role;

    #[test]
    fn permission_roundtrip_wire_value() {
        for permission in AclPermission::all() {
            let restored = AclPermission::from_str(permission.as_str());
            assert_eq!(restored.ok(), Some(*permission));
        }
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert!(AclPermission::from_str("owning_everything").is_err());
    }

    #[test]
    fn permission_set_decodes_wire_map() {
        let decoded: PermissionSet =
            serde_json::from_value(json!({ "read": true, "owning_delete": false }))
                .unwrap_or_default();

        assert_eq!(decoded.len(), 2);
        assert!(decoded.is_enabled(AclPermission::Read));
        assert!(!decoded.is_enabled(AclPermission::OwningDelete));
        assert!(!decoded.contains(AclPermission::Create));
    }

    #[test]
    fn toggled_twice_is_structurally_equal() {
        let baseline = PermissionSet::all_disabled().with(AclPermission::Read, true);
        let toggled = baseline.clone().toggled(AclPermission::Create);

        assert_ne!(toggled, baseline);
        assert_eq!(toggled.toggled(AclPermission::Create), baseline);
    }

    #[test]
    fn all_disabled_covers_vocabulary() {
        let set = PermissionSet::all_disabled();
        assert_eq!(set.len(), AclPermission::all().len());
        assert!(set.iter().all(|(_, enabled)| !enabled));
    }

    #[test]
    fn role_defaults_follow_ownership() {
        let admin = PermissionSet::default_for_role(Role::Admin);
        let user = PermissionSet::default_for_role(Role::User);

        assert!(admin.iter().all(|(_, enabled)| enabled));
        assert!(user.is_enabled(AclPermission::OwningRead));
        assert!(user.is_enabled(AclPermission::OwningDelete));
        assert!(!user.is_enabled(AclPermission::Read));
        assert_eq!(user.len(), AclPermission::all().len());
    }

    mod properties {
        use proptest::prelude::*;

        use super::super::{AclPermission, PermissionSet};

        fn permission_set() -> impl Strategy<Value = PermissionSet> {
            proptest::collection::vec(any::<bool>(), AclPermission::all().len()).prop_map(
                |flags| {
                    AclPermission::all()
                        .iter()
                        .copied()
                        .zip(flags)
                        .collect::<PermissionSet>()
                },
            )
        }

        proptest! {
            #[test]
            fn double_toggle_restores_the_set(
                set in permission_set(),
                index in 0..AclPermission::all().len(),
            ) {
                let permission = AclPermission::all()[index];
                let toggled = set.clone().toggled(permission);

                prop_assert_ne!(&toggled, &set);
                prop_assert_eq!(toggled.toggled(permission), set);
            }
        }
    }
}
