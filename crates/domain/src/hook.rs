use std::fmt::{Display, Formatter};
use std::str::FromStr;

use elysian_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Lowest priority a hook may run with.
pub const HOOK_PRIORITY_MIN: i64 = 1;

/// Highest priority a hook may run with.
pub const HOOK_PRIORITY_MAX: i64 = 100;

/// Read lifecycle point a hook is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    /// Runs before a query executes and may rewrite it.
    PreRead,
    /// Runs on every record returned by a read.
    #[default]
    PostRead,
}

impl HookEvent {
    /// Returns the wire value for this event.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreRead => "pre_read",
            Self::PostRead => "post_read",
        }
    }

    /// Returns all events in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[HookEvent] = &[HookEvent::PreRead, HookEvent::PostRead];
        ALL
    }

    /// Returns the literal a non-empty script for this event must start with.
    #[must_use]
    pub fn script_prefix(&self) -> &'static str {
        match self {
            Self::PreRead => "function preRead",
            Self::PostRead => "function postRead",
        }
    }
}

impl Display for HookEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for HookEvent {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pre_read" => Ok(Self::PreRead),
            "post_read" => Ok(Self::PostRead),
            _ => Err(AppError::Validation(format!(
                "unknown hook event '{value}'"
            ))),
        }
    }
}

/// Script language accepted by the hook runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookLanguage {
    /// ECMAScript executed by the embedded interpreter.
    #[default]
    Javascript,
}

impl HookLanguage {
    /// Returns the wire value for this language.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
        }
    }
}

/// A rule a hook definition currently breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum HookRuleViolation {
    /// A non-empty script does not start with the literal its event requires.
    ScriptPrefix {
        /// Event the hook is attached to.
        event: HookEvent,
        /// Literal the script must start with.
        expected_prefix: String,
    },
    /// The priority lies outside the accepted range.
    PriorityOutOfRange {
        /// Offending priority.
        priority: i64,
    },
}

impl Display for HookRuleViolation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScriptPrefix {
                event,
                expected_prefix,
            } => write!(
                formatter,
                "{event} hook scripts must start with '{expected_prefix}'"
            ),
            Self::PriorityOutOfRange { priority } => write!(
                formatter,
                "hook priority {priority} must be between {HOOK_PRIORITY_MIN} and {HOOK_PRIORITY_MAX}"
            ),
        }
    }
}

/// Checks the syntactic script rule for an event.
///
/// Empty scripts are not authored yet and always pass. The script is never
/// parsed or executed.
pub fn validate_script(event: HookEvent, script: &str) -> Result<(), HookRuleViolation> {
    if script.is_empty() || script.starts_with(event.script_prefix()) {
        return Ok(());
    }

    Err(HookRuleViolation::ScriptPrefix {
        event,
        expected_prefix: event.script_prefix().to_owned(),
    })
}

/// Checks that a priority lies within the accepted range.
pub fn validate_priority(priority: i64) -> Result<(), HookRuleViolation> {
    if (HOOK_PRIORITY_MIN..=HOOK_PRIORITY_MAX).contains(&priority) {
        return Ok(());
    }

    Err(HookRuleViolation::PriorityOutOfRange { priority })
}

/// Server-side read hook attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    /// Stable hook identifier.
    pub id: String,
    /// Entity the hook is attached to.
    pub entity: String,
    /// Operator-facing name.
    #[serde(default)]
    pub name: String,
    /// Read lifecycle point.
    #[serde(default)]
    pub event: HookEvent,
    /// Execution priority; higher runs first.
    #[serde(default = "default_priority")]
    pub priority: i64,
    /// Script language.
    #[serde(default)]
    pub language: HookLanguage,
    /// Script body.
    #[serde(default)]
    pub script: String,
    /// Whether the hook reads records regardless of the caller's ACL.
    #[serde(default)]
    pub bypass_acl: bool,
    /// Whether the hook runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_priority() -> i64 {
    HOOK_PRIORITY_MIN
}

fn default_enabled() -> bool {
    true
}

impl Hook {
    /// Returns every rule the hook currently breaks, script rule first.
    #[must_use]
    pub fn violations(&self) -> Vec<HookRuleViolation> {
        [
            validate_script(self.event, self.script.as_str()),
            validate_priority(self.priority),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }
}

/// Input for creating a hook on an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewHook {
    name: NonEmptyString,
    entity: NonEmptyString,
    event: HookEvent,
    priority: i64,
    language: HookLanguage,
    script: String,
    bypass_acl: bool,
    enabled: bool,
}

impl NewHook {
    /// Creates a disabled, empty hook with console defaults.
    pub fn new(entity: impl Into<String>, event: HookEvent, name: &str) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name.trim())?,
            entity: NonEmptyString::new(entity)?,
            event,
            priority: HOOK_PRIORITY_MIN,
            language: HookLanguage::Javascript,
            script: String::new(),
            bypass_acl: true,
            enabled: false,
        })
    }

    /// Returns the hook name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the target entity.
    #[must_use]
    pub fn entity(&self) -> &NonEmptyString {
        &self.entity
    }

    /// Returns the event.
    #[must_use]
    pub fn event(&self) -> HookEvent {
        self.event
    }

    /// Materializes the hook once the store assigned an identifier.
    #[must_use]
    pub fn into_hook(self, id: impl Into<String>) -> Hook {
        Hook {
            id: id.into(),
            entity: self.entity.into(),
            name: self.name.into(),
            event: self.event,
            priority: self.priority,
            language: self.language,
            script: self.script,
            bypass_acl: self.bypass_acl,
            enabled: self.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Hook, HookEvent, HookRuleViolation, NewHook, validate_priority, validate_script};

    #[test]
    fn post_read_script_with_matching_prefix_is_valid() {
        assert!(validate_script(HookEvent::PostRead, "function postRead(){}").is_ok());
    }

    #[test]
    fn post_read_script_with_pre_read_prefix_is_rejected() {
        let violation = validate_script(HookEvent::PostRead, "function preRead(){}");

        assert_eq!(
            violation,
            Err(HookRuleViolation::ScriptPrefix {
                event: HookEvent::PostRead,
                expected_prefix: "function postRead".to_owned(),
            })
        );
        let message = violation.err().map(|error| error.to_string());
        assert_eq!(
            message.as_deref(),
            Some("post_read hook scripts must start with 'function postRead'")
        );
    }

    #[test]
    fn empty_script_is_exempt() {
        assert!(validate_script(HookEvent::PreRead, "").is_ok());
    }

    #[test]
    fn leading_whitespace_breaks_the_prefix() {
        assert!(validate_script(HookEvent::PreRead, "  function preRead(query) {}").is_err());
    }

    #[test]
    fn priority_bounds_are_inclusive() {
        assert!(validate_priority(1).is_ok());
        assert!(validate_priority(100).is_ok());
        assert!(validate_priority(0).is_err());
        assert!(validate_priority(101).is_err());
    }

    #[test]
    fn hook_decodes_with_console_defaults() {
        let hook: Hook = serde_json::from_value(json!({
            "id": "h-1",
            "entity": "orders"
        }))
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(hook.event, HookEvent::PostRead);
        assert_eq!(hook.priority, 1);
        assert!(hook.enabled);
        assert!(!hook.bypass_acl);
        assert!(hook.violations().is_empty());
    }

    #[test]
    fn new_hook_requires_trimmed_name() {
        assert!(NewHook::new("orders", HookEvent::PreRead, "   ").is_err());

        let created = NewHook::new("orders", HookEvent::PreRead, "  mask emails ")
            .unwrap_or_else(|_| unreachable!())
            .into_hook("h-2");
        assert_eq!(created.name, "mask emails");
        assert!(!created.enabled);
        assert!(created.bypass_acl);
        assert_eq!(created.priority, 1);
    }
}
