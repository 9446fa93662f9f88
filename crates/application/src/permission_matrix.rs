use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use elysian_core::{AppError, AppResult};
use elysian_domain::{AclPermission, PermissionSet};

use crate::admin_ports::SubjectPermissions;
use crate::loading::{LoadTracker, RequestGeneration};


/// Entities whose current permission set differs from the baseline.
pub type PendingChangeMap = BTreeMap<String, PermissionSet>;

/// Lifecycle of one (subject, entity) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// No baseline has been loaded for the entity.
    Unloaded,
    /// The current set equals the baseline.
    Loaded,
    /// The current set differs from the baseline.
    Dirty,
}

/// Failure of one entity inside a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFailure {
    /// Entity the write targeted.
    pub entity: String,
    /// Error returned for that entity.
    pub error: AppError,
}

/// Per-entity outcome of a bulk write or reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkCommitReport {
    /// Entities written successfully.
    pub succeeded: Vec<String>,
    /// Entities whose write failed.
    pub failures: Vec<EntityFailure>,
}

impl BulkCommitReport {
    /// Returns whether every attempted entity succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns whether nothing was attempted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failures.is_empty()
    }
}

/// Editable permission matrix of one subject.
///
/// Only the baseline and the sparse pending map are stored; the current set
/// of an entity is its pending entry when present and its baseline otherwise.
/// A pending entry therefore exists exactly when current differs from baseline.
#[derive(Debug, Clone, Default)]
pub struct PermissionMatrix {
    subject: Option<String>,
    baseline: SubjectPermissions,
    pending: PendingChangeMap,
    loads: LoadTracker,
    needs_reload: bool,
}

impl PermissionMatrix {
    /// Creates an empty matrix with no subject selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected subject.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Starts loading the row of `subject`.
    ///
    /// Switching subjects drops the previous baseline and all pending edits.
    /// Edits are rejected until the load completes.
    pub fn begin_load(&mut self, subject: &str, now: DateTime<Utc>) -> RequestGeneration {
        if self.subject.as_deref() != Some(subject) {
            self.subject = Some(subject.to_owned());
            self.baseline.clear();
            self.pending.clear();
            self.needs_reload = false;
        }

        self.loads.begin(now)
    }

    /// Applies a loaded row as the new baseline.
    ///
    /// Returns `false` and leaves the matrix untouched when the response is stale.
    pub fn apply_baseline(
        &mut self,
        generation: RequestGeneration,
        permissions: SubjectPermissions,
    ) -> bool {
        if !self.loads.complete(generation) {
            return false;
        }

        self.baseline = permissions;
        self.pending.clear();
        self.needs_reload = false;
        true
    }

    /// Applies a reloaded row to the `settled` entities only.
    ///
    /// Settled entities take the reloaded baseline and lose their pending
    /// edits; every other entity keeps both. Returns `false` and leaves the
    /// matrix untouched when the response is stale.
    pub fn apply_settled(
        &mut self,
        generation: RequestGeneration,
        permissions: SubjectPermissions,
        settled: &[String],
    ) -> bool {
        if !self.loads.complete(generation) {
            return false;
        }

        for entity in settled {
            self.pending.remove(entity);
            match permissions.get(entity) {
                Some(reloaded) => {
                    self.baseline.insert(entity.clone(), reloaded.clone());
                }
                None => {
                    self.baseline.remove(entity);
                }
            }
        }
        self.needs_reload = false;
        true
    }

    /// Ends a failed load.
    ///
    /// The matrix keeps whatever `begin_load` left, which is empty after a
    /// subject switch.
    pub fn fail_load(&mut self, generation: RequestGeneration) -> bool {
        self.loads.complete(generation)
    }

    /// Marks the baseline of `changed` entities as out of date.
    ///
    /// Their pending edits are dropped and further edits are rejected until
    /// the next successful load.
    pub fn mark_needs_reload(&mut self, changed: &[String]) {
        for entity in changed {
            self.pending.remove(entity);
        }
        self.needs_reload = true;
    }

    /// Returns whether the baseline is known to be out of date.
    #[must_use]
    pub fn needs_reload(&self) -> bool {
        self.needs_reload
    }

    /// Returns whether a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loads.is_loading()
    }

    /// Returns whether the loading spinner should be shown at `now`.
    #[must_use]
    pub fn spinner_visible(&self, now: DateTime<Utc>) -> bool {
        self.loads.spinner_visible(now)
    }

    /// Flips one permission of one entity and returns whether the entity is now dirty.
    pub fn toggle(&mut self, entity: &str, permission: AclPermission) -> AppResult<bool> {
        self.require_editable()?;

        let baseline = self
            .baseline
            .get(entity)
            .ok_or_else(|| AppError::NotFound(format!("entity '{entity}' is not in the matrix")))?;
        if !baseline.contains(permission) {
            return Err(AppError::Validation(format!(
                "permission '{}' is not defined for entity '{entity}'",
                permission.as_str()
            )));
        }

        let next = self
            .pending
            .get(entity)
            .unwrap_or(baseline)
            .clone()
            .toggled(permission);

        if &next == baseline {
            self.pending.remove(entity);
            return Ok(false);
        }

        self.pending.insert(entity.to_owned(), next);
        Ok(true)
    }

    /// Returns the current set of an entity.
    #[must_use]
    pub fn current(&self, entity: &str) -> Option<&PermissionSet> {
        self.pending.get(entity).or_else(|| self.baseline.get(entity))
    }

    /// Returns the baseline set of an entity.
    #[must_use]
    pub fn baseline(&self, entity: &str) -> Option<&PermissionSet> {
        self.baseline.get(entity)
    }

    /// Returns the state of one cell.
    #[must_use]
    pub fn cell_state(&self, entity: &str) -> CellState {
        if self.pending.contains_key(entity) {
            CellState::Dirty
        } else if self.baseline.contains_key(entity) {
            CellState::Loaded
        } else {
            CellState::Unloaded
        }
    }

    /// Returns the entity names of the loaded row.
    pub fn entities(&self) -> impl Iterator<Item = &str> + '_ {
        self.baseline.keys().map(String::as_str)
    }

    /// Returns the sparse set of changed entities.
    #[must_use]
    pub fn pending(&self) -> &PendingChangeMap {
        &self.pending
    }

    /// Returns whether any entity has unsaved edits.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns the writes a bulk commit has to issue, one per dirty entity.
    pub fn pending_writes(&self) -> AppResult<(String, Vec<(String, PermissionSet)>)> {
        self.require_editable()?;
        let subject = self.require_subject()?;

        Ok((
            subject,
            self.pending
                .iter()
                .map(|(entity, permissions)| (entity.clone(), permissions.clone()))
                .collect(),
        ))
    }

    /// Folds a successful write into the baseline.
    ///
    /// The pending entry is cleared only when it equals the new baseline.
    pub fn record_written(&mut self, entity: &str, written: PermissionSet) {
        let settled = self.pending.get(entity) == Some(&written);
        self.baseline.insert(entity.to_owned(), written);
        if settled {
            self.pending.remove(entity);
        }
    }

    /// Drops every pending edit.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn require_subject(&self) -> AppResult<String> {
        self.subject
            .clone()
            .ok_or_else(|| AppError::Conflict("no subject selected".to_owned()))
    }

    fn require_editable(&self) -> AppResult<()> {
        if self.loads.is_loading() {
            return Err(AppError::Conflict("permission matrix is loading".to_owned()));
        }
        if self.needs_reload {
            return Err(AppError::Conflict(
                "permission matrix must be reloaded".to_owned(),
            ));
        }

        Ok(())
    }
}
