use elysian_core::{AppError, AppResult};
use elysian_domain::Role;

/// Optimistic role selector of one user row.
///
/// A requested role is shown immediately. It becomes committed once the
/// server accepts it, or rolls back to the previous role when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleField {
    committed: Role,
    pending: Option<Role>,
}

impl RoleField {
    /// Creates a field showing the committed role.
    #[must_use]
    pub fn new(committed: Role) -> Self {
        Self {
            committed,
            pending: None,
        }
    }

    /// Returns the role shown to the operator.
    #[must_use]
    pub fn displayed(&self) -> Role {
        self.pending.unwrap_or(self.committed)
    }

    /// Returns the last role the server accepted.
    #[must_use]
    pub fn committed(&self) -> Role {
        self.committed
    }

    /// Returns whether a change awaits the server.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts an optimistic change. Returns `false` when the role is already committed.
    pub fn request(&mut self, role: Role) -> AppResult<bool> {
        if self.pending.is_some() {
            return Err(AppError::Conflict(
                "a role change is already in progress".to_owned(),
            ));
        }
        if role == self.committed {
            return Ok(false);
        }

        self.pending = Some(role);
        Ok(true)
    }

    /// Accepts the pending role.
    pub fn commit(&mut self) {
        if let Some(role) = self.pending.take() {
            self.committed = role;
        }
    }

    /// Drops the pending role and returns the one shown again.
    pub fn rollback(&mut self) -> Role {
        self.pending = None;
        self.committed
    }
}

#[cfg(test)]
mod tests {
    use elysian_core::AppError;
    use elysian_domain::Role;

    use super::RoleField;

    #[test]
    fn optimistic_change_commits() {
        let mut field = RoleField::new(Role::User);

        assert_eq!(field.request(Role::Admin), Ok(true));
        assert_eq!(field.displayed(), Role::Admin);
        assert_eq!(field.committed(), Role::User);

        field.commit();
        assert!(!field.is_pending());
        assert_eq!(field.committed(), Role::Admin);
    }

    #[test]
    fn rollback_restores_previous_role() {
        let mut field = RoleField::new(Role::Admin);
        assert_eq!(field.request(Role::User), Ok(true));

        assert_eq!(field.rollback(), Role::Admin);
        assert_eq!(field.displayed(), Role::Admin);
    }

    #[test]
    fn overlapping_requests_conflict() {
        let mut field = RoleField::new(Role::User);

        assert_eq!(field.request(Role::User), Ok(false));
        assert_eq!(field.request(Role::Admin), Ok(true));
        assert!(matches!(
            field.request(Role::User),
            Err(AppError::Conflict(_))
        ));
    }
}
