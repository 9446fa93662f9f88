use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};

use elysian_core::{AppError, AppResult};

use crate::admin_ports::{AclRepository, SubjectPermissions};
use crate::permission_matrix::{BulkCommitReport, EntityFailure, PermissionMatrix};


/// Application service that loads and commits permission matrices.
#[derive(Clone)]
pub struct AclService {
    repository: Arc<dyn AclRepository>,
}

impl AclService {
    /// Creates a new service from an ACL repository.
    #[must_use]
    pub fn new(repository: Arc<dyn AclRepository>) -> Self {
        Self { repository }
    }

    /// Lists the entity names permissions can be granted on.
    pub async fn list_entity_names(&self) -> AppResult<Vec<String>> {
        let mut names = self.repository.list_entity_names().await?;
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Fetches the permission row of a subject without touching any matrix.
    pub async fn fetch_permissions(&self, subject: &str) -> AppResult<SubjectPermissions> {
        self.repository.load_permissions_for_subject(subject).await
    }

    /// Loads the row of `subject` as the matrix baseline.
    pub async fn load_baseline(&self, matrix: &mut PermissionMatrix, subject: &str) -> AppResult<()> {
        let generation = matrix.begin_load(subject, Utc::now());

        match self.fetch_permissions(subject).await {
            Ok(permissions) => {
                if !matrix.apply_baseline(generation, permissions) {
                    info!(subject = subject, "discarded stale permission row");
                }
                Ok(())
            }
            Err(error) => {
                matrix.fail_load(generation);
                warn!(subject = subject, error = %error, "permission row load failed");
                Err(error)
            }
        }
    }

    /// Writes every pending entity concurrently, one call per entity.
    ///
    /// Succeeded entities fold into the baseline. Failed entities stay pending
    /// and are listed in the report.
    pub async fn commit_pending(&self, matrix: &mut PermissionMatrix) -> AppResult<BulkCommitReport> {
        let (subject, writes) = matrix.pending_writes()?;
        if writes.is_empty() {
            return Ok(BulkCommitReport::default());
        }

        let outcomes = join_all(writes.iter().map(|(entity, permissions)| {
            self.repository
                .write_permission(subject.as_str(), entity.as_str(), permissions)
        }))
        .await;

        let mut report = BulkCommitReport::default();
        for ((entity, permissions), outcome) in writes.into_iter().zip(outcomes) {
            match outcome {
                Ok(()) => {
                    matrix.record_written(entity.as_str(), permissions);
                    report.succeeded.push(entity);
                }
                Err(error) => {
                    warn!(
                        subject = %subject,
                        entity = %entity,
                        error = %error,
                        "permission write failed"
                    );
                    report.failures.push(EntityFailure { entity, error });
                }
            }
        }

        info!(
            subject = %subject,
            succeeded = report.succeeded.len(),
            failed = report.failures.len(),
            "permission commit finished"
        );
        Ok(report)
    }

    /// Resets each listed entity to its server default, regardless of dirty state.
    ///
    /// On full success pending edits are dropped and the baseline is reloaded.
    /// On partial failure only the reset entities take the reloaded baseline;
    /// failed entities keep their edits. A failed reload never hides the
    /// report: the matrix is marked for reload instead.
    pub async fn restore_defaults(
        &self,
        matrix: &mut PermissionMatrix,
        entities: &[String],
    ) -> AppResult<BulkCommitReport> {
        if matrix.is_loading() {
            return Err(AppError::Conflict("permission matrix is loading".to_owned()));
        }
        let subject = matrix.require_subject()?;

        let outcomes = join_all(entities.iter().map(|entity| {
            self.repository
                .reset_permission_to_default(subject.as_str(), entity.as_str())
        }))
        .await;

        let mut report = BulkCommitReport::default();
        for (entity, outcome) in entities.iter().zip(outcomes) {
            match outcome {
                Ok(()) => report.succeeded.push(entity.clone()),
                Err(error) => {
                    warn!(
                        subject = %subject,
                        entity = %entity,
                        error = %error,
                        "permission reset failed"
                    );
                    report.failures.push(EntityFailure {
                        entity: entity.clone(),
                        error,
                    });
                }
            }
        }

        if report.is_complete() {
            matrix.discard_pending();
        }
        if report.succeeded.is_empty() {
            return Ok(report);
        }

        let generation = matrix.begin_load(subject.as_str(), Utc::now());
        match self.fetch_permissions(subject.as_str()).await {
            Ok(permissions) => {
                let applied = if report.is_complete() {
                    matrix.apply_baseline(generation, permissions)
                } else {
                    matrix.apply_settled(generation, permissions, &report.succeeded)
                };
                if !applied {
                    info!(subject = %subject, "discarded stale permission row");
                }
            }
            Err(error) => {
                matrix.fail_load(generation);
                matrix.mark_needs_reload(&report.succeeded);
                warn!(
                    subject = %subject,
                    error = %error,
                    "permission row reload after reset failed"
                );
            }
        }

        Ok(report)
    }
}
