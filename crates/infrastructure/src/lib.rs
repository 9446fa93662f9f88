//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_elysian_admin_client;
mod in_memory_elysian_store;

pub use http_elysian_admin_client::{BasicCredentials, HttpElysianAdminClient};
pub use in_memory_elysian_store::InMemoryElysianStore;
