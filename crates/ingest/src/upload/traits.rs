use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::ChunkRecord;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Upload timed out after {0:?}")]
    Timeout(Duration),
}

/// Destination for chunk records (the embeddings API, or a fake in tests).
#[async_trait]
pub trait ChunkSink: Send + Sync {
    /// Store one record. Re-sending the same `doc_id` replaces it.
    async fn upsert(&self, record: &ChunkRecord) -> Result<(), UploadError>;

    /// Ok when the sink is ready to accept records.
    async fn health_check(&self) -> Result<(), UploadError>;
}
