//! Bounded-size, overlapping chunking for embedding.
//!
//! A document is walked with a cursor: each chunk is filled up to the unit
//! budget of a [`UnitCounter`], trimmed back to a sentence boundary when one
//! is close, and the next chunk starts a little before the previous cut.

mod counter;
mod helpers;
mod splitter;
mod types;

pub use counter::{select_counter, token_counter, CharCounter, UnitCounter, UnitKind};
#[cfg(feature = "tiktoken")]
pub use counter::TokenCounter;
pub use helpers::{find_sentence_boundary, CharIndex, SENTENCE_LOOKBACK};
pub use splitter::{chunk_document, chunk_text};
pub use types::{Chunk, ChunkConfig, ChunkError};
