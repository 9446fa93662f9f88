pub mod acl_sessions;
pub mod entity_types;
pub mod health;
pub mod hook_sessions;
pub mod hooks;
pub mod records;
pub mod schema_sessions;
pub mod users;
