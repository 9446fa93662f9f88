use chrono::{DateTime, Utc};
use elysian_application::{BulkCommitReport, CellState, EntityFailure, PermissionMatrix};
use elysian_domain::PermissionSet;
use uuid::Uuid;

use super::types::{
    AclCellResponse, AclSessionResponse, BulkCommitResponse, EntityFailureResponse,
    PermissionFlagResponse,
};

fn cell_state_label(state: CellState) -> &'static str {
    match state {
        CellState::Unloaded => "unloaded",
        CellState::Loaded => "loaded",
        CellState::Dirty => "dirty",
    }
}

fn permission_flags(
    current: &PermissionSet,
    baseline: Option<&PermissionSet>,
) -> Vec<PermissionFlagResponse> {
    current
        .iter()
        .map(|(permission, enabled)| PermissionFlagResponse {
            permission: permission.as_str().to_owned(),
            description: permission.description().to_owned(),
            enabled,
            changed: baseline.is_some_and(|baseline| baseline.is_enabled(permission) != enabled),
        })
        .collect()
}

impl AclSessionResponse {
    /// Snapshots a matrix as seen at `now`.
    #[must_use]
    pub fn from_matrix(session_id: Uuid, matrix: &PermissionMatrix, now: DateTime<Utc>) -> Self {
        let cells = matrix
            .entities()
            .map(|entity| AclCellResponse {
                entity: entity.to_owned(),
                state: cell_state_label(matrix.cell_state(entity)).to_owned(),
                permissions: matrix
                    .current(entity)
                    .map(|current| permission_flags(current, matrix.baseline(entity)))
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            session_id: session_id.to_string(),
            subject: matrix.subject().map(str::to_owned),
            is_loading: matrix.is_loading(),
            spinner_visible: matrix.spinner_visible(now),
            needs_reload: matrix.needs_reload(),
            has_unsaved_changes: matrix.has_unsaved_changes(),
            pending_entities: matrix.pending().keys().cloned().collect(),
            cells,
        }
    }
}

impl From<EntityFailure> for EntityFailureResponse {
    fn from(value: EntityFailure) -> Self {
        Self {
            entity: value.entity,
            message: value.error.to_string(),
        }
    }
}

impl BulkCommitResponse {
    /// Pairs a bulk report with the session it left behind.
    #[must_use]
    pub fn new(report: BulkCommitReport, session: AclSessionResponse) -> Self {
        Self {
            succeeded: report.succeeded,
            failures: report
                .failures
                .into_iter()
                .map(EntityFailureResponse::from)
                .collect(),
            session,
        }
    }
}
