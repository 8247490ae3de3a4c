pub mod chunker;
pub mod document;
pub mod processor;
pub mod record;
pub mod stats;
pub mod upload;

pub use chunker::{
    chunk_document, chunk_text, select_counter, Chunk, ChunkConfig, ChunkError, UnitCounter, UnitKind,
};
pub use document::{extract_file, normalize_text, ExtractionError};
pub use processor::{discover_files, ContentProcessor, IngestError, ProcessedFile};
pub use record::{ChunkRecord, ChunkRecordMetadata, DocumentSummary};
pub use stats::ProcessingStats;
pub use upload::{upload_all, ChunkSink, EmbeddingsApiClient, UploadError, UploadReport};
