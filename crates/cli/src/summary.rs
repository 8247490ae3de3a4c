use chunkwise_core::Config;
use chunkwise_ingest::{DocumentSummary, ProcessingStats, UnitKind};

const MAX_ERRORS_SHOWN: usize = 10;

/// Render the end-of-run report.
pub fn render(
    stats: &ProcessingStats,
    documents: &[DocumentSummary],
    config: &Config,
    unit: UnitKind,
    dry_run: bool,
) -> String {
    let rule = "=".repeat(60);
    let mut out = Vec::new();

    out.push(rule.clone());
    out.push("INGESTION SUMMARY".to_string());
    out.push(rule.clone());
    out.push(format!("Files processed:     {}", stats.files_processed));
    out.push(format!("Files failed:        {}", stats.files_failed));
    out.push(format!("Chunks created:      {}", stats.chunks_created));
    if dry_run {
        out.push("Vectors upserted:    N/A (dry run)".to_string());
        out.push("Upload success rate: N/A (dry run)".to_string());
    } else {
        out.push(format!("Vectors upserted:    {}", stats.vectors_upserted));
        out.push(format!(
            "Upload success rate: {:.1}%",
            stats.upload_success_rate()
        ));
    }

    out.push(String::new());
    out.push("Configuration:".to_string());
    out.push(format!("  Module:        {}", config.chunking.module));
    out.push(format!("  Chunk size:    {} {unit}", config.chunking.chunk_size));
    out.push(format!("  Chunk overlap: {} characters", config.chunking.chunk_overlap));
    out.push(format!("  API URL:       {}", config.api.url));

    if !documents.is_empty() {
        out.push(String::new());
        out.push("Files:".to_string());
        for doc in documents {
            out.push(format!(
                "  {} ({}): {} chunks, {} {unit}, {} bytes",
                doc.filename, doc.doc_id, doc.chunks_created, doc.total_tokens, doc.file_size
            ));
        }
    }

    if !stats.errors.is_empty() {
        out.push(String::new());
        out.push(format!("Errors ({}):", stats.errors.len()));
        for err in stats.errors.iter().take(MAX_ERRORS_SHOWN) {
            out.push(format!("  - {err}"));
        }
        if stats.errors.len() > MAX_ERRORS_SHOWN {
            out.push(format!(
                "  ... and {} more",
                stats.errors.len() - MAX_ERRORS_SHOWN
            ));
        }
    }

    out.push(rule);
    out.join("\n")
}
