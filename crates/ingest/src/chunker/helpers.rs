//! Character indexing and sentence-boundary search used by the chunker.

/// Characters searched backwards from a raw cut for a sentence boundary.
pub const SENTENCE_LOOKBACK: usize = 200;

/// A string addressed by character position instead of byte position.
///
/// Chunk offsets are character offsets, so every slice the chunker takes goes
/// through this table.
pub struct CharIndex<'a> {
    text: &'a str,
    chars: Vec<char>,
    /// Byte offset of every char, plus `text.len()` as the final entry.
    offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (byte, c) in text.char_indices() {
            chars.push(c);
            offsets.push(byte);
        }
        offsets.push(text.len());
        Self {
            text,
            chars,
            offsets,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters `start..end`. Both bounds are clamped to the text length.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.text[self.offsets[start]..self.offsets[end]]
    }

    fn char_at(&self, pos: usize) -> char {
        self.chars[pos]
    }
}

/// Find the last natural break in `search_start..max_end`.
///
/// Patterns are tried in priority order and the first one with any match
/// wins:
/// 1. `.` followed by whitespace or the window end,
/// 2. `!` or `?` followed by whitespace or the window end,
/// 3. a blank line (`\n\n`).
///
/// Returns the position just past the match, so a cut after `". "` includes
/// the space. `None` when no pattern matches.
pub fn find_sentence_boundary(text: &CharIndex<'_>, search_start: usize, max_end: usize) -> Option<usize> {
    let max_end = max_end.min(text.len());
    if search_start >= max_end {
        return None;
    }

    last_terminal_match(text, search_start, max_end, |c| c == '.')
        .or_else(|| last_terminal_match(text, search_start, max_end, |c| c == '!' || c == '?'))
        .or_else(|| last_blank_line(text, search_start, max_end))
}

/// End of the last `terminal` char followed by whitespace or `max_end`.
fn last_terminal_match(
    text: &CharIndex<'_>,
    search_start: usize,
    max_end: usize,
    terminal: impl Fn(char) -> bool,
) -> Option<usize> {
    let mut last = None;
    let mut i = search_start;
    while i < max_end {
        if terminal(text.char_at(i)) {
            if i + 1 == max_end {
                last = Some(max_end);
            } else if text.char_at(i + 1).is_whitespace() {
                last = Some(i + 2);
                i += 2;
                continue;
            }
        }
        i += 1;
    }
    last
}

/// End of the last non-overlapping `\n\n` inside the window.
fn last_blank_line(text: &CharIndex<'_>, search_start: usize, max_end: usize) -> Option<usize> {
    let mut last = None;
    let mut i = search_start;
    while i + 1 < max_end {
        if text.char_at(i) == '\n' && text.char_at(i + 1) == '\n' {
            last = Some(i + 2);
            i += 2;
        } else {
            i += 1;
        }
    }
    last
}
