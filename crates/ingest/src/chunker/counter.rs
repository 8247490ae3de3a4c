//! Pluggable text-length measurement.
//!
//! A [`UnitCounter`] is picked once, when the processor is built; the chunker
//! never checks which backend it has.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::helpers::CharIndex;
use super::types::ChunkError;

/// Measurement granularity for chunk sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Tokens,
    Characters,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Tokens => f.write_str("tokens"),
            UnitKind::Characters => f.write_str("characters"),
        }
    }
}

impl FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tokens" | "token" => Ok(UnitKind::Tokens),
            "characters" | "chars" | "char" => Ok(UnitKind::Characters),
            other => Err(format!("unknown unit '{other}' (expected tokens or characters)")),
        }
    }
}

/// Maps text to a non-negative length in some unit.
pub trait UnitCounter: Send + Sync {
    fn measure(&self, text: &str) -> usize;

    fn kind(&self) -> UnitKind;

    /// Largest `end` in `start..=text.len()` whose slice `start..end` measures
    /// at most `max_size`.
    ///
    /// Binary search over character positions: O(log n) calls to
    /// [`measure`](Self::measure) instead of one per candidate. Assumes length
    /// grows with the slice. Returns `start` when not even one character fits.
    fn max_end(&self, text: &CharIndex<'_>, start: usize, max_size: usize) -> usize {
        let (mut lo, mut hi) = (start, text.len());
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.measure(text.slice(start, mid)) <= max_size {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }
}

/// One unit per Unicode scalar value.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCounter;

impl UnitCounter for CharCounter {
    fn measure(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Characters
    }

    fn max_end(&self, text: &CharIndex<'_>, start: usize, max_size: usize) -> usize {
        start.saturating_add(max_size).min(text.len())
    }
}

/// cl100k_base BPE tokens, the GPT-4 family encoding.
#[cfg(feature = "tiktoken")]
pub struct TokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

#[cfg(feature = "tiktoken")]
impl TokenCounter {
    pub fn cl100k() -> Result<Self, ChunkError> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| ChunkError::MeasurementUnavailable(e.to_string()))?;
        Ok(Self { bpe })
    }
}

#[cfg(feature = "tiktoken")]
impl UnitCounter for TokenCounter {
    fn measure(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Tokens
    }
}

/// Build the token counter, or report why it is unavailable.
pub fn token_counter() -> Result<Arc<dyn UnitCounter>, ChunkError> {
    #[cfg(feature = "tiktoken")]
    {
        Ok(Arc::new(TokenCounter::cl100k()?))
    }
    #[cfg(not(feature = "tiktoken"))]
    {
        Err(ChunkError::MeasurementUnavailable(
            "built without the `tiktoken` feature".to_string(),
        ))
    }
}

/// Pick a counter for `preferred`, falling back to characters when tokens
/// are unavailable.
pub fn select_counter(preferred: UnitKind) -> Arc<dyn UnitCounter> {
    match preferred {
        UnitKind::Characters => Arc::new(CharCounter),
        UnitKind::Tokens => match token_counter() {
            Ok(counter) => {
                tracing::info!("Using cl100k_base tokens for chunk sizing");
                counter
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token counter unavailable, using character-based chunking");
                Arc::new(CharCounter)
            }
        },
    }
}
