mod cli;
mod summary;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use chunkwise_core::config::load_dotenv;
use chunkwise_core::Config;
use chunkwise_ingest::{
    discover_files, select_counter, upload_all, ChunkConfig, ChunkRecord, ChunkSink, ContentProcessor,
    EmbeddingsApiClient, ProcessingStats, UnitKind,
};

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the ingestion. `Ok(false)` means the run finished with failures.
async fn run(args: CliArgs) -> Result<bool> {
    load_dotenv();
    let config = args.apply_to(Config::from_env());
    config.log_summary();

    if !args.input_dir.is_dir() {
        bail!(
            "Input directory does not exist or is not a directory: {}",
            args.input_dir.display()
        );
    }

    let unit: UnitKind = config
        .chunking
        .unit
        .parse()
        .map_err(anyhow::Error::msg)
        .context("invalid chunk unit")?;
    let chunk_config = ChunkConfig {
        max_size: config.chunking.chunk_size,
        overlap: config.chunking.chunk_overlap,
    };
    let processor = ContentProcessor::new(chunk_config, select_counter(unit))
        .context("invalid chunking configuration")?;

    let timeout = Duration::from_secs(config.api.upload_timeout_secs);
    let client = EmbeddingsApiClient::new(&config.api.url, timeout);

    if args.dry_run {
        info!("Dry run: skipping health check and uploads");
    } else {
        client
            .health_check()
            .await
            .with_context(|| format!("Embeddings API at {} is not healthy", config.api.url))?;
        info!(url = %config.api.url, "Embeddings API is healthy");
    }

    let files = discover_files(&args.input_dir);
    if files.is_empty() {
        warn!(dir = %args.input_dir.display(), "No supported files found");
        return Ok(true);
    }
    info!(count = files.len(), unit = %processor.unit_kind(), "Found files to process");

    let module = config.chunking.module.clone();
    let processor = Arc::new(processor);
    let results = {
        let processor = Arc::clone(&processor);
        tokio::task::spawn_blocking(move || processor.process_all(&files, &module))
            .await
            .context("file processing task panicked")?
    };

    let mut stats = ProcessingStats::default();
    let mut documents = Vec::new();
    let mut records: Vec<ChunkRecord> = Vec::new();
    for (path, result) in results {
        match result {
            Ok(processed) => {
                info!(
                    file = %processed.summary.filename,
                    chunks = processed.summary.chunks_created,
                    "Processed file"
                );
                stats.record_file(&processed);
                documents.push(processed.summary);
                records.extend(processed.records);
            }
            Err(e) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                stats.record_failure(&name, &e);
            }
        }
    }

    if !args.dry_run && !records.is_empty() {
        let report = upload_all(&client, &records, config.api.max_concurrent, timeout).await;
        stats.vectors_upserted = report.succeeded;
        for failure in report.failures {
            stats.errors.push(format!("upload {}: {}", failure.doc_id, failure.error));
        }
    }

    println!("{}", summary::render(&stats, &documents, &config, processor.unit_kind(), args.dry_run));

    Ok(!stats.has_failures(args.dry_run))
}
