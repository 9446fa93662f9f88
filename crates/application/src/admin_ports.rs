mod acl;
mod hooks;
mod records;
mod schema;
mod users;

pub use acl::{AclRepository, SubjectPermissions};
pub use hooks::HookRepository;
pub use records::RecordRepository;
pub use schema::{EntityTypeSummary, SchemaRepository};
pub use users::UserRepository;
