//! Domain types and invariants for the Elysian console.

#![forbid(unsafe_code)]

mod acl;
mod hook;
mod record;
mod schema;
mod user;

pub use acl::{AclPermission, PermissionSet};
pub use hook::{
    HOOK_PRIORITY_MAX, HOOK_PRIORITY_MIN, Hook, HookEvent, HookLanguage, HookRuleViolation,
    NewHook, validate_priority, validate_script,
};
pub use record::{
    DEFAULT_RECORD_LIMIT, FILTER_OPERATORS, RecordDocument, RecordQuery, SortDirection, record_id,
};
pub use schema::{
    FieldMap, FieldNode, FieldPatch, FieldPath, FieldType, SchemaTree, mapping_at,
    normalize_field_map, validate_field_map,
};
pub use user::{ConsoleUser, NewUser, Role, validate_password};
