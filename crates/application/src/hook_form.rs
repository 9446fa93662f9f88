use elysian_core::{AppError, AppResult};
use elysian_domain::{Hook, HookEvent, HookRuleViolation};

#[cfg(test)]
mod tests;

/// One editable hook attribute with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookField {
    /// Operator-facing name.
    Name(String),
    /// Read lifecycle point.
    Event(HookEvent),
    /// Execution priority.
    Priority(i64),
    /// Full replacement script text.
    Script(String),
    /// ACL bypass flag.
    BypassAcl(bool),
    /// Enabled flag.
    Enabled(bool),
}

/// Coarse state of a hook form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// No hook is selected.
    NoDraft,
    /// A draft is being edited.
    Editing,
    /// The draft is being persisted.
    Saving,
}

/// Editing session over a single hook definition.
///
/// Validity is derived from the draft on every read, so it always reflects
/// the latest field change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookFormSession {
    baseline: Option<Hook>,
    draft: Option<Hook>,
    saving: bool,
}

impl HookFormSession {
    /// Creates a session with no hook selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a hook, discarding any current draft.
    pub fn select(&mut self, hook: Hook) {
        self.draft = Some(hook.clone());
        self.baseline = Some(hook);
        self.saving = false;
    }

    /// Drops the selection and its draft.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        match (&self.draft, self.saving) {
            (None, _) => FormPhase::NoDraft,
            (Some(_), false) => FormPhase::Editing,
            (Some(_), true) => FormPhase::Saving,
        }
    }

    /// Returns the draft under edit.
    #[must_use]
    pub fn draft(&self) -> Option<&Hook> {
        self.draft.as_ref()
    }

    /// Replaces one attribute of the draft.
    pub fn set_field(&mut self, field: HookField) -> AppResult<()> {
        if self.saving {
            return Err(AppError::Conflict("hook is being saved".to_owned()));
        }
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| AppError::Conflict("no hook selected".to_owned()))?;

        match field {
            HookField::Name(name) => draft.name = name,
            HookField::Event(event) => draft.event = event,
            HookField::Priority(priority) => draft.priority = priority,
            HookField::Script(script) => draft.script = script,
            HookField::BypassAcl(bypass_acl) => draft.bypass_acl = bypass_acl,
            HookField::Enabled(enabled) => draft.enabled = enabled,
        }

        Ok(())
    }

    /// Returns every rule the draft currently breaks.
    #[must_use]
    pub fn violations(&self) -> Vec<HookRuleViolation> {
        self.draft
            .as_ref()
            .map(Hook::violations)
            .unwrap_or_default()
    }

    /// Returns whether a draft exists and passes every rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.draft.is_some() && self.violations().is_empty()
    }

    /// Returns whether the draft differs from the loaded hook.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.draft != self.baseline
    }

    /// Enters the saving phase and returns the hook to persist.
    ///
    /// An invalid draft is refused without leaving the editing phase.
    pub fn begin_save(&mut self) -> AppResult<Hook> {
        if self.saving {
            return Err(AppError::Conflict("hook is already being saved".to_owned()));
        }
        let draft = self
            .draft
            .clone()
            .ok_or_else(|| AppError::Conflict("no hook selected".to_owned()))?;

        let violations = draft.violations();
        if !violations.is_empty() {
            let message = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Validation(message));
        }

        self.saving = true;
        Ok(draft)
    }

    /// Leaves the saving phase with the persisted hook as the new baseline.
    pub fn finish_save(&mut self, saved: Hook) {
        self.saving = false;
        self.select(saved);
    }

    /// Leaves the saving phase with the draft unchanged.
    pub fn abort_save(&mut self) {
        self.saving = false;
    }
}
