//! Upload records for the embeddings API.
//!
//! Field names and nesting are the API's contract; do not rename them.

use chunkwise_core::Document;
use serde::{Deserialize, Serialize};

use crate::chunker::Chunk;

/// One chunk as sent to `POST /api/embeddings/upsert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// The chunk id; the API stores each chunk as its own document.
    pub doc_id: String,
    pub text: String,
    pub metadata: ChunkRecordMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecordMetadata {
    pub original_doc_id: String,
    pub module: String,
    pub chunk_id: String,
    pub chunk_index: usize,
    /// Character offset of the chunk's cut in the normalized text.
    pub start_ts: usize,
    pub filename: String,
    pub file_extension: String,
    pub file_size: u64,
    /// Chunk length in the units the document was chunked with.
    pub token_count: usize,
}

impl ChunkRecord {
    pub fn new(doc: &Document, module: &str, chunk: &Chunk) -> Self {
        Self {
            doc_id: chunk.id.clone(),
            text: chunk.text.clone(),
            metadata: ChunkRecordMetadata {
                original_doc_id: doc.id.clone(),
                module: module.to_string(),
                chunk_id: chunk.id.clone(),
                chunk_index: chunk.index,
                start_ts: chunk.start_offset,
                filename: doc.metadata.filename.clone(),
                file_extension: doc.metadata.extension.clone(),
                file_size: doc.metadata.size,
                token_count: chunk.unit_count,
            },
        }
    }
}

/// Attach document metadata to every chunk, preserving chunk order.
pub fn build_records(doc: &Document, module: &str, chunks: &[Chunk]) -> Vec<ChunkRecord> {
    chunks
        .iter()
        .map(|chunk| ChunkRecord::new(doc, module, chunk))
        .collect()
}

/// Per-file line of the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub doc_id: String,
    pub filename: String,
    pub chunks_created: usize,
    pub total_tokens: usize,
    pub file_size: u64,
}

impl DocumentSummary {
    pub fn new(doc: &Document, chunks: &[Chunk]) -> Self {
        Self {
            doc_id: doc.id.clone(),
            filename: doc.metadata.filename.clone(),
            chunks_created: chunks.len(),
            total_tokens: chunks.iter().map(|c| c.unit_count).sum(),
            file_size: doc.metadata.size,
        }
    }
}
