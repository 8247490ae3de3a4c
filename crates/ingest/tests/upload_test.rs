//! Integration tests for the embeddings API client.
//!
//! A local axum server on an ephemeral port stands in for the API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use chunkwise_ingest::chunker::CharCounter;
use chunkwise_ingest::{upload_all, ChunkConfig, ChunkSink, ContentProcessor, EmbeddingsApiClient, UploadError};

#[derive(Clone, Default)]
struct FakeApi {
    received: Arc<Mutex<Vec<Value>>>,
    healthy: bool,
}

async fn health(State(api): State<FakeApi>) -> StatusCode {
    if api.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn upsert(State(api): State<FakeApi>, Json(body): Json<Value>) -> (StatusCode, String) {
    let text = body["text"].as_str().unwrap_or_default().to_string();
    if text.contains("reject") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "rejected".to_string());
    }
    if text.contains("stall") {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    api.received.lock().unwrap().push(body);
    (StatusCode::OK, "{\"status\":\"ok\"}".to_string())
}

async fn start_server(healthy: bool) -> (SocketAddr, FakeApi) {
    let api = FakeApi {
        healthy,
        ..Default::default()
    };
    let app = Router::new()
        .route("/api/embeddings/health", get(health))
        .route("/api/embeddings/upsert", post(upsert))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, api)
}

fn processor() -> ContentProcessor {
    ContentProcessor::new(
        ChunkConfig {
            max_size: 60,
            overlap: 10,
        },
        Arc::new(CharCounter),
    )
    .unwrap()
}

#[tokio::test]
async fn health_check_reports_api_status() {
    let (addr, _) = start_server(true).await;
    let client = EmbeddingsApiClient::new(&format!("http://{addr}/"), Duration::from_secs(5));
    assert!(client.health_check().await.is_ok());

    let (addr, _) = start_server(false).await;
    let client = EmbeddingsApiClient::new(&format!("http://{addr}"), Duration::from_secs(5));
    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, UploadError::Api { status: 503, .. }));
}

#[tokio::test]
async fn unreachable_api_is_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EmbeddingsApiClient::new(&format!("http://{addr}"), Duration::from_secs(2));
    assert!(matches!(client.health_check().await, Err(UploadError::Http(_))));
}

#[tokio::test]
async fn processed_file_uploads_in_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("week1.txt");
    std::fs::write(
        &path,
        "Chunking splits long documents. Each piece stays under the budget. \
         Overlap keeps context between neighbours. The API embeds every piece.",
    )
    .unwrap();

    let processed = processor().process_file(&path, "course").unwrap();
    assert!(processed.records.len() > 1);

    let (addr, api) = start_server(true).await;
    let client = EmbeddingsApiClient::new(&format!("http://{addr}"), Duration::from_secs(5));
    let report = upload_all(&client, &processed.records, 2, Duration::from_secs(5)).await;

    assert_eq!(report.succeeded, processed.records.len());
    assert!(report.failures.is_empty());

    let mut received = api.received.lock().unwrap().clone();
    received.sort_by_key(|v| v["metadata"]["chunk_index"].as_u64());
    let first = &received[0];
    assert_eq!(first["doc_id"], "course_week1_chunk_0");
    assert_eq!(first["text"], "Chunking splits long documents.");
    assert_eq!(first["metadata"]["original_doc_id"], "course_week1");
    assert_eq!(first["metadata"]["module"], "course");
    assert_eq!(first["metadata"]["chunk_id"], "course_week1_chunk_0");
    assert_eq!(first["metadata"]["start_ts"], 0);
    assert_eq!(first["metadata"]["filename"], "week1.txt");
    assert_eq!(first["metadata"]["file_extension"], ".txt");
    assert_eq!(first["metadata"]["token_count"], 31);
}

#[tokio::test]
async fn rejected_and_stalled_records_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.txt");
    std::fs::write(&path, "fine text").unwrap();
    let mut records = processor().process_file(&path, "default").unwrap().records;

    let mut rejected = records[0].clone();
    rejected.doc_id = "mixed_chunk_reject".to_string();
    rejected.text = "please reject this".to_string();
    let mut stalled = records[0].clone();
    stalled.doc_id = "mixed_chunk_stall".to_string();
    stalled.text = "stall forever".to_string();
    records.push(rejected);
    records.push(stalled);

    let (addr, api) = start_server(true).await;
    let client = EmbeddingsApiClient::new(&format!("http://{addr}"), Duration::from_secs(10));
    let report = upload_all(&client, &records, 4, Duration::from_millis(300)).await;

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].doc_id, "mixed_chunk_reject");
    assert!(report.failures[0].error.contains("500"));
    assert_eq!(report.failures[1].doc_id, "mixed_chunk_stall");
    assert!(report.failures[1].error.contains("timed out"));
    assert_eq!(api.received.lock().unwrap().len(), 1);
}
