use std::sync::Arc;

use tracing::{info, warn};

use elysian_core::{AppError, AppResult};
use elysian_domain::{RecordDocument, RecordQuery};

use crate::admin_ports::RecordRepository;


/// Application service for browsing and deleting entity records.
#[derive(Clone)]
pub struct RecordBrowserService {
    repository: Arc<dyn RecordRepository>,
}

impl RecordBrowserService {
    /// Creates a new service from a record repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Runs a query and returns one page of records.
    pub async fn query(&self, query: &RecordQuery) -> AppResult<Vec<RecordDocument>> {
        match self.repository.query_records(query).await {
            Ok(records) => {
                info!(
                    entity = %query.entity(),
                    returned = records.len(),
                    "record query finished"
                );
                Ok(records)
            }
            Err(error) => {
                warn!(entity = %query.entity(), error = %error, "record query failed");
                Err(error)
            }
        }
    }

    /// Deletes one record of an entity.
    pub async fn delete_record(&self, entity: &str, record_id: &str) -> AppResult<()> {
        if entity.trim().is_empty() || record_id.trim().is_empty() {
            return Err(AppError::Validation(
                "entity and record id are required".to_owned(),
            ));
        }

        self.repository.delete_record(entity, record_id).await?;
        info!(entity = entity, record_id = record_id, "record deleted");
        Ok(())
    }
}
