use elysian_core::AppError;
use elysian_domain::{Hook, HookEvent, HookLanguage, HookRuleViolation};

use super::{FormPhase, HookField, HookFormSession};

fn mask_emails() -> Hook {
    Hook {
        id: "h-1".to_owned(),
        entity: "users".to_owned(),
        name: "mask emails".to_owned(),
        event: HookEvent::PostRead,
        priority: 10,
        language: HookLanguage::Javascript,
        script: "function postRead(ctx) { return ctx; }".to_owned(),
        bypass_acl: false,
        enabled: true,
    }
}

fn editing() -> HookFormSession {
    let mut session = HookFormSession::new();
    session.select(mask_emails());
    session
}

#[test]
fn new_session_has_no_draft() {
    let mut session = HookFormSession::new();

    assert_eq!(session.phase(), FormPhase::NoDraft);
    assert!(!session.is_valid());
    assert!(matches!(
        session.set_field(HookField::Enabled(false)),
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(session.begin_save(), Err(AppError::Conflict(_))));
}

#[test]
fn wrong_prefix_blocks_save_and_stays_observable() {
    let mut session = editing();

    assert!(
        session
            .set_field(HookField::Script("function preRead(q) {}".to_owned()))
            .is_ok()
    );

    assert!(!session.is_valid());
    assert_eq!(
        session.violations(),
        vec![HookRuleViolation::ScriptPrefix {
            event: HookEvent::PostRead,
            expected_prefix: "function postRead".to_owned(),
        }]
    );

    let attempt = session.begin_save();
    assert_eq!(
        attempt,
        Err(AppError::Validation(
            "post_read hook scripts must start with 'function postRead'".to_owned()
        ))
    );
    assert_eq!(session.phase(), FormPhase::Editing);
    assert!(!session.violations().is_empty());
}

#[test]
fn changing_event_revalidates_script() {
    let mut session = editing();
    assert!(session.is_valid());

    assert!(session.set_field(HookField::Event(HookEvent::PreRead)).is_ok());
    assert!(!session.is_valid());

    assert!(session.set_field(HookField::Script(String::new())).is_ok());
    assert!(session.is_valid());
    assert!(session.has_unsaved_changes());
}

#[test]
fn priority_outside_range_is_invalid() {
    let mut session = editing();

    assert!(session.set_field(HookField::Priority(0)).is_ok());

    assert_eq!(
        session.violations(),
        vec![HookRuleViolation::PriorityOutOfRange { priority: 0 }]
    );
}

#[test]
fn save_cycle_moves_through_phases() {
    let mut session = editing();
    assert!(session.set_field(HookField::Enabled(false)).is_ok());

    let outgoing = session.begin_save().unwrap_or_else(|_| unreachable!());
    assert_eq!(session.phase(), FormPhase::Saving);
    assert!(!outgoing.enabled);
    assert!(matches!(
        session.set_field(HookField::Enabled(true)),
        Err(AppError::Conflict(_))
    ));

    session.finish_save(outgoing);
    assert_eq!(session.phase(), FormPhase::Editing);
    assert!(!session.has_unsaved_changes());
}

#[test]
fn aborted_save_keeps_draft() {
    let mut session = editing();
    assert!(session.set_field(HookField::Name("hide emails".to_owned())).is_ok());
    let before = session.draft().cloned();

    assert!(session.begin_save().is_ok());
    session.abort_save();

    assert_eq!(session.phase(), FormPhase::Editing);
    assert_eq!(session.draft().cloned(), before);
    assert!(session.has_unsaved_changes());
}

#[test]
fn selecting_another_hook_discards_draft() {
    let mut session = editing();
    assert!(session.set_field(HookField::Name("changed".to_owned())).is_ok());

    let other = Hook {
        id: "h-2".to_owned(),
        ..mask_emails()
    };
    session.select(other.clone());

    assert_eq!(session.draft(), Some(&other));
    assert!(!session.has_unsaved_changes());

    session.clear();
    assert_eq!(session.phase(), FormPhase::NoDraft);
}
