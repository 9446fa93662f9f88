use std::str::FromStr;

use elysian_application::{FormPhase, HookField, HookFormSession, HookGroup};
use elysian_core::AppResult;
use elysian_domain::{Hook, HookEvent};
use uuid::Uuid;

use super::types::{
    HookGroupResponse, HookResponse, HookSessionResponse, UpdateHookFieldsRequest,
};

impl From<Hook> for HookResponse {
    fn from(value: Hook) -> Self {
        Self {
            event: value.event.as_str().to_owned(),
            language: value.language.as_str().to_owned(),
            id: value.id,
            entity: value.entity,
            name: value.name,
            priority: value.priority,
            script: value.script,
            bypass_acl: value.bypass_acl,
            enabled: value.enabled,
        }
    }
}

impl From<HookGroup> for HookGroupResponse {
    fn from(value: HookGroup) -> Self {
        Self {
            event: value.event.as_str().to_owned(),
            hooks: value.hooks.into_iter().map(HookResponse::from).collect(),
        }
    }
}

fn phase_label(phase: FormPhase) -> &'static str {
    match phase {
        FormPhase::NoDraft => "no_draft",
        FormPhase::Editing => "editing",
        FormPhase::Saving => "saving",
    }
}

impl HookSessionResponse {
    /// Snapshots a form session, including its current rule violations.
    #[must_use]
    pub fn from_session(session_id: Uuid, session: &HookFormSession) -> Self {
        Self {
            session_id: session_id.to_string(),
            phase: phase_label(session.phase()).to_owned(),
            draft: session.draft().cloned().map(HookResponse::from),
            has_unsaved_changes: session.has_unsaved_changes(),
            is_valid: session.is_valid(),
            violations: session
                .violations()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl UpdateHookFieldsRequest {
    /// Converts the present fields into form edits, in a fixed order.
    pub fn into_fields(self) -> AppResult<Vec<HookField>> {
        let event = self
            .event
            .as_deref()
            .map(HookEvent::from_str)
            .transpose()?;

        Ok([
            self.name.map(HookField::Name),
            event.map(HookField::Event),
            self.priority.map(HookField::Priority),
            self.script.map(HookField::Script),
            self.bypass_acl.map(HookField::BypassAcl),
            self.enabled.map(HookField::Enabled),
        ]
        .into_iter()
        .flatten()
        .collect())
    }
}
