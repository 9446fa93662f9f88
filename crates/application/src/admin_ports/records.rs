use async_trait::async_trait;

use elysian_core::AppResult;
use elysian_domain::{RecordDocument, RecordQuery};

/// Repository port for entity records.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Runs a query and returns the matching page of records.
    async fn query_records(&self, query: &RecordQuery) -> AppResult<Vec<RecordDocument>>;

    /// Deletes one record by id.
    async fn delete_record(&self, entity: &str, record_id: &str) -> AppResult<()>;
}
