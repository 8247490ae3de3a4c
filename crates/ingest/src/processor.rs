//! File discovery and the extract → chunk → record pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::chunker::{chunk_document, ChunkConfig, ChunkError, UnitCounter, UnitKind};
use crate::document::{extract_file, is_supported, ExtractionError};
use crate::record::{build_records, ChunkRecord, DocumentSummary};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Chunking(#[from] ChunkError),
}

/// Records and summary for one successfully processed file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub records: Vec<ChunkRecord>,
    pub summary: DocumentSummary,
}

/// Recursively collect supported files under `dir`, sorted by path.
///
/// Unreadable directory entries are logged and skipped.
pub fn discover_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "walkdir error, skipping entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_supported(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Turns files into chunk records with a fixed size budget and counter.
pub struct ContentProcessor {
    config: ChunkConfig,
    counter: Arc<dyn UnitCounter>,
}

impl ContentProcessor {
    /// Fails fast on an invalid `config`, before any file is touched.
    pub fn new(config: ChunkConfig, counter: Arc<dyn UnitCounter>) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self { config, counter })
    }

    pub fn unit_kind(&self) -> UnitKind {
        self.counter.kind()
    }

    /// Extract, normalize and chunk one file.
    pub fn process_file(&self, path: &Path, module: &str) -> Result<ProcessedFile, IngestError> {
        info!(path = %path.display(), "Processing file");

        let doc = extract_file(path, module)?;
        let chunks = chunk_document(&doc, &self.config, self.counter.as_ref())?;
        let records = build_records(&doc, module, &chunks);
        let summary = DocumentSummary::new(&doc, &chunks);

        Ok(ProcessedFile {
            path: path.to_path_buf(),
            records,
            summary,
        })
    }

    /// Process every file in parallel. Results keep the order of `paths`;
    /// one file failing does not affect the others.
    pub fn process_all(
        &self,
        paths: &[PathBuf],
        module: &str,
    ) -> Vec<(PathBuf, Result<ProcessedFile, IngestError>)> {
        paths
            .par_iter()
            .map(|path| {
                let result = self.process_file(path, module);
                if let Err(e) = &result {
                    error!(path = %path.display(), error = %e, "Failed to process file");
                }
                (path.clone(), result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::CharCounter;
    use std::fs;

    fn processor(max_size: usize, overlap: usize) -> ContentProcessor {
        ContentProcessor::new(ChunkConfig { max_size, overlap }, Arc::new(CharCounter)).unwrap()
    }

    #[test]
    fn discovers_supported_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.MD"), "a").unwrap();
        fs::write(dir.path().join("nested/deeper/c.vtt"), "c").unwrap();
        fs::write(dir.path().join("nested/skip.png"), "png").unwrap();

        let files = discover_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.MD", "b.txt", "nested/deeper/c.vtt"]);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let result = ContentProcessor::new(ChunkConfig { max_size: 10, overlap: 10 }, Arc::new(CharCounter));
        assert!(matches!(result, Err(ChunkError::Configuration(_))));
    }

    #[test]
    fn processes_vtt_into_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.vtt");
        fs::write(
            &path,
            "WEBVTT\n\n1\n00:00.000 --> 00:02.000\nWelcome to the course.\n\n2\n00:02.000 --> 00:04.000\nToday we cover chunking.\n",
        )
        .unwrap();

        let processed = processor(30, 5).process_file(&path, "course").unwrap();

        assert_eq!(processed.summary.doc_id, "course_lecture");
        assert_eq!(processed.summary.chunks_created, processed.records.len());
        assert_eq!(processed.records.len(), 3);

        let first = &processed.records[0];
        assert_eq!(first.doc_id, "course_lecture_chunk_0");
        assert_eq!(first.text, "Welcome to the course.");
        assert_eq!(first.metadata.original_doc_id, "course_lecture");
        assert_eq!(first.metadata.module, "course");
        assert_eq!(first.metadata.file_extension, ".vtt");
        assert_eq!(first.metadata.start_ts, 0);
        assert_eq!(first.metadata.token_count, 22);

        let second = &processed.records[1];
        assert_eq!(second.metadata.chunk_index, 1);
        assert_eq!(second.metadata.start_ts, 18);
        assert!(second.text.ends_with("Today we cover chunking."));

        let tail = &processed.records[2];
        assert_eq!(tail.doc_id, "course_lecture_chunk_2");
        assert_eq!(tail.metadata.start_ts, 42);
        assert_eq!(tail.text, "king.");
    }

    #[test]
    fn process_all_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let empty = dir.path().join("empty.txt");
        let other = dir.path().join("other.md");
        fs::write(&good, "Some real content here.").unwrap();
        fs::write(&empty, "   \n  ").unwrap();
        fs::write(&other, "# Title\n\nMore content.").unwrap();

        let paths = vec![good.clone(), empty.clone(), other.clone()];
        let results = processor(100, 10).process_all(&paths, "default");

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, good);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, empty);
        assert!(matches!(
            results[1].1,
            Err(IngestError::Extraction(ExtractionError::Empty))
        ));
        assert_eq!(results[2].0, other);
        let md = results[2].1.as_ref().unwrap();
        assert_eq!(md.records[0].text, "# Title More content.");
    }
}
