//! Chunk configuration, output and error types.

use serde::Serialize;
use thiserror::Error;

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// `max_size`/`overlap` cannot drive the cursor forward. Never retried.
    #[error("invalid chunk configuration: {0}")]
    Configuration(String),
    /// The requested unit counter cannot be built. Callers fall back to characters.
    #[error("measurement unavailable: {0}")]
    MeasurementUnavailable(String),
}

// ── Configuration ───────────────────────────────────────────────────────────

/// Size budget for the chunking engine, in the counter's units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum units per chunk (default: 800).
    pub max_size: usize,
    /// Characters stepped back from a chunk's end to start the next one (default: 100).
    pub overlap: usize,
}

impl ChunkConfig {
    /// Require `max_size > 0` and `overlap < max_size`.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.max_size == 0 {
            return Err(ChunkError::Configuration(
                "max chunk size must be greater than 0".to_string(),
            ));
        }
        if self.overlap >= self.max_size {
            return Err(ChunkError::Configuration(format!(
                "overlap ({}) must be smaller than max chunk size ({})",
                self.overlap, self.max_size
            )));
        }
        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_size: 800,
            overlap: 100,
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A bounded slice of a document.
///
/// `start_offset..end_offset` is the untrimmed cut in characters; `text` is
/// that slice with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// `{document_id}_chunk_{index}`
    pub id: String,
    /// 0-based position among the document's emitted chunks.
    pub index: usize,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Length of `text` as measured by the counter that produced it.
    pub unit_count: usize,
}

impl Chunk {
    pub fn chunk_id(doc_id: &str, index: usize) -> String {
        format!("{doc_id}_chunk_{index}")
    }
}
