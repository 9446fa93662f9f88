use async_trait::async_trait;
use reqwest::Method;

use elysian_application::RecordRepository;
use elysian_core::AppResult;
use elysian_domain::{RecordDocument, RecordQuery};

use super::HttpElysianAdminClient;

#[async_trait]
impl RecordRepository for HttpElysianAdminClient {
    async fn query_records(&self, query: &RecordQuery) -> AppResult<Vec<RecordDocument>> {
        let url = self.endpoint(&["query"])?;
        let records: Option<Vec<RecordDocument>> =
            self.send_json(self.request(Method::POST, url).json(query)).await?;

        Ok(records.unwrap_or_default())
    }

    async fn delete_record(&self, entity: &str, record_id: &str) -> AppResult<()> {
        let url = self.endpoint(&[entity, record_id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
