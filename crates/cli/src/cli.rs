use std::path::PathBuf;

use chunkwise_core::Config;
use chunkwise_ingest::UnitKind;
use clap::Parser;

/// Chunk course content and upload it to the embeddings API.
///
/// Walks the input directory for PDF, text, Markdown and WebVTT files,
/// splits each into overlapping chunks and upserts them one record per chunk.
/// Flags override `INGEST_*` environment variables, which override defaults.
#[derive(Parser, Debug)]
#[command(name = "ingest-content", about = "Chunk documents and upload them to the embeddings API")]
pub struct CliArgs {
    /// Directory to scan recursively for content files
    #[arg(short = 'i', long)]
    pub input_dir: PathBuf,

    /// Base URL of the embeddings API
    #[arg(short = 'u', long)]
    pub api_url: Option<String>,

    /// Maximum chunk size, in the selected unit
    #[arg(short = 'c', long)]
    pub chunk_size: Option<usize>,

    /// Overlap between consecutive chunks, in characters
    #[arg(short = 'o', long)]
    pub chunk_overlap: Option<usize>,

    /// Module name used to prefix document ids
    #[arg(short = 'm', long)]
    pub module: Option<String>,

    /// Maximum concurrent upload requests
    #[arg(short = 'j', long)]
    pub max_concurrent: Option<usize>,

    /// Chunk size unit: tokens or characters
    #[arg(long)]
    pub unit: Option<UnitKind>,

    /// Per-request upload timeout in seconds
    #[arg(long)]
    pub upload_timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Process files without uploading
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Layer the flags that were given on top of `config`.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(url) = &self.api_url {
            config.api.url = url.clone();
        }
        if let Some(size) = self.chunk_size {
            config.chunking.chunk_size = size;
        }
        if let Some(overlap) = self.chunk_overlap {
            config.chunking.chunk_overlap = overlap;
        }
        if let Some(module) = &self.module {
            config.chunking.module = module.clone();
        }
        if let Some(max) = self.max_concurrent {
            config.api.max_concurrent = max;
        }
        if let Some(unit) = self.unit {
            config.chunking.unit = unit.to_string();
        }
        if let Some(secs) = self.upload_timeout {
            config.api.upload_timeout_secs = secs;
        }
        config
    }
}
