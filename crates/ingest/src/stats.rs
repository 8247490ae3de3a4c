use serde::Serialize;

use crate::processor::ProcessedFile;

/// Run-wide counters for the ingestion summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub chunks_created: usize,
    pub vectors_upserted: usize,
    pub errors: Vec<String>,
}

impl ProcessingStats {
    pub fn record_file(&mut self, file: &ProcessedFile) {
        self.files_processed += 1;
        self.chunks_created += file.records.len();
    }

    pub fn record_failure(&mut self, filename: &str, error: impl std::fmt::Display) {
        self.files_failed += 1;
        self.errors.push(format!("{filename}: {error}"));
    }

    /// Percentage of created chunks that were upserted; 0 when nothing was created.
    pub fn upload_success_rate(&self) -> f64 {
        if self.chunks_created == 0 {
            0.0
        } else {
            self.vectors_upserted as f64 / self.chunks_created as f64 * 100.0
        }
    }

    /// Whether the run should exit non-zero.
    pub fn has_failures(&self, dry_run: bool) -> bool {
        self.files_failed > 0 || (!dry_run && self.vectors_upserted < self.chunks_created)
    }
}
