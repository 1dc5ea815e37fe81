use crate::adapters::dataset::JsonDataset;
use crate::domain::model::{EmployeeRef, SkillRecord};
use crate::domain::ports::{EmployeeDirectory, SkillRecordSource};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Dataset served over HTTP. Every call fetches a fresh document so that
/// concurrent reports never share a snapshot.
#[derive(Debug, Clone)]
pub struct HttpDataset {
    client: Client,
    endpoint: String,
}

impl HttpDataset {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_snapshot(&self) -> Result<JsonDataset> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(ReportError::ApiStatusError {
                endpoint: self.endpoint.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        JsonDataset::from_json_slice(&body)
    }
}

#[async_trait]
impl SkillRecordSource for HttpDataset {
    async fn fetch_records(&self, employee: Option<&EmployeeRef>) -> Result<Vec<SkillRecord>> {
        Ok(self.fetch_snapshot().await?.joined_records(employee))
    }
}

#[async_trait]
impl EmployeeDirectory for HttpDataset {
    async fn find_by_name(&self, name: &str) -> Result<Option<EmployeeRef>> {
        Ok(self.fetch_snapshot().await?.find_employee(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_records_from_api() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/skills");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "employees": [{"id": "u1", "name": "Ann"}],
                    "skill_records": [
                        {"employee_id": "u1", "skills": [{"name": "Go", "proficiency": 3}]}
                    ]
                }));
        });

        let dataset = HttpDataset::new(server.url("/skills"));
        let records = dataset.fetch_records(None).await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_name, "Ann");
        assert_eq!(records[0].skills[0].label(), "Expert");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/skills");
            then.status(503);
        });

        let dataset = HttpDataset::new(server.url("/skills"));
        let result = dataset.find_by_name("Ann").await;

        api_mock.assert();
        match result {
            Err(ReportError::ApiStatusError { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected ApiStatusError, got {:?}", other),
        }
    }
}
