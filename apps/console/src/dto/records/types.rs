use elysian_domain::{RecordDocument, RecordQuery};
use serde::Serialize;
use ts_rs::TS;

/// One page of entity records.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/console-types/src/generated/record-list-response.ts"
)]
pub struct RecordListResponse {
    pub entity: String,
    #[ts(type = "number")]
    pub offset: u64,
    #[ts(type = "number")]
    pub limit: u64,
    #[ts(type = "Array<Record<string, unknown>>")]
    pub records: Vec<RecordDocument>,
}

impl RecordListResponse {
    pub fn new(query: &RecordQuery, records: Vec<RecordDocument>) -> Self {
        Self {
            entity: query.entity().to_string(),
            offset: query.offset(),
            limit: query.limit(),
            records,
        }
    }
}
