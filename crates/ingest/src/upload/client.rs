use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::traits::{ChunkSink, UploadError};
use crate::record::ChunkRecord;

/// HTTP client for the embeddings API.
///
/// The API embeds and stores each record server-side; this side only ships
/// text and metadata.
pub struct EmbeddingsApiClient {
    client: Client,
    base_url: String,
}

impl EmbeddingsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/embeddings/{path}", self.base_url)
    }
}

#[async_trait]
impl ChunkSink for EmbeddingsApiClient {
    async fn upsert(&self, record: &ChunkRecord) -> Result<(), UploadError> {
        let response = self
            .client
            .post(self.endpoint("upsert"))
            .json(record)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Api { status, body });
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), UploadError> {
        let response = self.client.get(self.endpoint("health")).send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Api { status, body });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let client = EmbeddingsApiClient::new("http://localhost:8001//", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:8001");
        assert_eq!(
            client.endpoint("upsert"),
            "http://localhost:8001/api/embeddings/upsert"
        );
    }
}
