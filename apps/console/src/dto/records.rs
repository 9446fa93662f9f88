mod types;

pub use types::RecordListResponse;
