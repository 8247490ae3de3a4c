//! The cursor walk that cuts a document into overlapping chunks.

use chunkwise_core::Document;

use super::counter::UnitCounter;
use super::helpers::{find_sentence_boundary, CharIndex, SENTENCE_LOOKBACK};
use super::types::{Chunk, ChunkConfig, ChunkError};

/// Chunk a normalized document, deriving chunk ids from `doc.id`.
pub fn chunk_document(
    doc: &Document,
    config: &ChunkConfig,
    counter: &dyn UnitCounter,
) -> Result<Vec<Chunk>, ChunkError> {
    chunk_text(&doc.text, &doc.id, config, counter)
}

/// Split `text` into chunks of at most `config.max_size` units.
///
/// Each cut is the furthest position that fits the budget, pulled back to the
/// last sentence boundary within [`SENTENCE_LOOKBACK`] characters when one
/// exists. The next chunk starts `config.overlap` characters before the
/// previous cut, or exactly at it when stepping back would not move the
/// cursor forward. The walk ends once the cursor reaches the end of the text,
/// so the chunk that reaches the end is followed by one `overlap`-sized tail.
///
/// Empty or whitespace-only text yields no chunks. The only error is an
/// invalid `config`, reported before any work is done.
pub fn chunk_text(
    text: &str,
    doc_id: &str,
    config: &ChunkConfig,
    counter: &dyn UnitCounter,
) -> Result<Vec<Chunk>, ChunkError> {
    config.validate()?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let index = CharIndex::new(text);
    let len = index.len();

    if counter.measure(text) <= config.max_size {
        return Ok(vec![Chunk {
            id: Chunk::chunk_id(doc_id, 0),
            index: 0,
            text: trimmed.to_string(),
            start_offset: 0,
            end_offset: len,
            unit_count: counter.measure(trimmed),
        }]);
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < len {
        let mut end = counter.max_end(&index, start, config.max_size);
        if end <= start {
            // A single character already exceeds the budget; take it alone.
            tracing::debug!(doc_id, start, "irreducible unit exceeds max chunk size");
            end = start + 1;
        }

        if end < len {
            let search_start = start.max(end.saturating_sub(SENTENCE_LOOKBACK));
            if let Some(cut) = find_sentence_boundary(&index, search_start, end) {
                if cut > start {
                    end = cut;
                }
            }
        }

        let piece = index.slice(start, end).trim();
        if piece.is_empty() {
            tracing::debug!(doc_id, start, end, "skipping whitespace-only region");
        } else {
            let chunk_index = chunks.len();
            chunks.push(Chunk {
                id: Chunk::chunk_id(doc_id, chunk_index),
                index: chunk_index,
                text: piece.to_string(),
                start_offset: start,
                end_offset: end,
                unit_count: counter.measure(piece),
            });
        }

        let next = end.saturating_sub(config.overlap);
        start = if next > start { next } else { end };
    }

    tracing::debug!(doc_id, chunks = chunks.len(), chars = len, "chunked document");
    Ok(chunks)
}
