//! Bounded-concurrency upload of chunk records.

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use super::traits::{ChunkSink, UploadError};
use crate::record::ChunkRecord;

#[derive(Debug, Clone, Serialize)]
pub struct UploadFailure {
    pub doc_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<UploadFailure>,
}

/// Upsert every record with at most `max_concurrent` requests in flight.
///
/// Each upsert gets its own `per_item_timeout`. A failed or timed-out record
/// is recorded in the report and does not cancel the others. Failures keep
/// the order of `records`.
pub async fn upload_all(
    sink: &dyn ChunkSink,
    records: &[ChunkRecord],
    max_concurrent: usize,
    per_item_timeout: Duration,
) -> UploadReport {
    let semaphore = Semaphore::new(max_concurrent.max(1));

    info!(
        records = records.len(),
        max_concurrent, "Uploading chunks to embeddings API"
    );

    let futures = records.iter().map(|record| {
        let semaphore = &semaphore;
        async move {
            // The semaphore is never closed, so a permit is always granted.
            let _permit = semaphore.acquire().await.ok();
            match tokio::time::timeout(per_item_timeout, sink.upsert(record)).await {
                Ok(result) => result,
                Err(_) => Err(UploadError::Timeout(per_item_timeout)),
            }
        }
    });

    let results = join_all(futures).await;

    let mut report = UploadReport {
        attempted: records.len(),
        ..Default::default()
    };
    for (record, result) in records.iter().zip(results) {
        match result {
            Ok(()) => {
                debug!(doc_id = %record.doc_id, "Upserted chunk");
                report.succeeded += 1;
            }
            Err(e) => {
                error!(doc_id = %record.doc_id, error = %e, "Failed to upsert chunk");
                report.failures.push(UploadFailure {
                    doc_id: record.doc_id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    report
}
