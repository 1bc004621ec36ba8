//! Sentence segmentation
//!
//! Splits after `.`, `!` or `?` when the next character is whitespace, then
//! keeps only segments long enough to be real sentences.

use crate::types::Sentence;

/// Segments must be longer than this many characters (after trimming).
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Sentence splitter with a minimum-length filter
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    min_chars: usize,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self {
            min_chars: MIN_SENTENCE_CHARS,
        }
    }

    /// Keep segments strictly longer than `min_chars` characters
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Split `text` into indexed sentences in reading order.
    ///
    /// Indices count only the segments that survive the length filter, so
    /// they are always `0..n`.
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        raw_segments(text)
            .into_iter()
            .map(str::trim)
            .filter(|s| s.chars().count() > self.min_chars)
            .enumerate()
            .map(|(index, s)| Sentence::new(s, index))
            .collect()
    }
}

/// Convenience wrapper using the default length filter
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    SentenceSegmenter::new().segment(text)
}

/// Unfiltered segments: the text is cut right after every terminal
/// punctuation mark that is followed by whitespace, and the whitespace run
/// is dropped.
fn raw_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(next_i, next_c)) = chars.peek() else {
            break;
        };
        if !next_c.is_whitespace() {
            continue;
        }

        segments.push(&text[start..next_i]);
        start = next_i;
        while let Some(&(j, w)) = chars.peek() {
            if w.is_whitespace() {
                chars.next();
                start = j + w.len_utf8();
            } else {
                break;
            }
        }
    }

    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}
