//! Abstractive refinement of an extractive summary
//!
//! Short summaries are rewritten in one generator call. Long ones are split
//! into fixed-size word chunks, each substantial chunk is rewritten, and the
//! outputs are joined. Chunks too small to be worth rewriting are dropped.

use crate::capabilities::{AbstractiveGenerator, CapabilityResult};
use crate::errors::CapabilityError;
use tracing::debug;

/// Output length bounds passed to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

/// Rewrites a summary through an [`AbstractiveGenerator`]
#[derive(Debug, Clone)]
pub struct AbstractiveRefiner {
    /// Word count above which the summary is chunked
    chunk_words: usize,
    /// A chunk is rewritten only if it has more words than this
    min_chunk_words: usize,
    chunk_bounds: LengthBounds,
    whole_bounds: LengthBounds,
    /// Refinement only runs when more sentences than this were selected
    min_selected: usize,
}

impl Default for AbstractiveRefiner {
    fn default() -> Self {
        Self {
            chunk_words: 800,
            min_chunk_words: 50,
            chunk_bounds: LengthBounds { min: 50, max: 200 },
            whole_bounds: LengthBounds { min: 60, max: 250 },
            min_selected: 3,
        }
    }
}

impl AbstractiveRefiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_words(mut self, chunk_words: usize) -> Self {
        self.chunk_words = chunk_words.max(1);
        self
    }

    /// Whether a summary built from `selected` sentences qualifies
    pub fn applies_to(&self, selected: usize) -> bool {
        selected > self.min_selected
    }

    /// Rewrite `summary`. Any error or an empty rewrite is returned as `Err`
    /// so the caller can keep the extractive text.
    pub fn refine(
        &self,
        summary: &str,
        generator: &dyn AbstractiveGenerator,
    ) -> CapabilityResult<String> {
        let words: Vec<&str> = summary.split_whitespace().collect();

        let rewritten = if words.len() > self.chunk_words {
            let mut parts = Vec::new();
            for chunk in words.chunks(self.chunk_words) {
                if chunk.len() <= self.min_chunk_words {
                    debug!(words = chunk.len(), "skipping short chunk");
                    continue;
                }
                let text = chunk.join(" ");
                let bounds = self.chunk_bounds;
                parts.push(generator.summarize(&text, bounds.min, bounds.max)?);
            }
            debug!(chunks = parts.len(), "chunked refinement");
            parts.join(" ")
        } else {
            let bounds = self.whole_bounds;
            generator.summarize(summary, bounds.min, bounds.max)?
        };

        let rewritten = rewritten.trim();
        if rewritten.is_empty() {
            return Err(CapabilityError::malformed(generator.name(), "empty rewrite"));
        }
        Ok(rewritten.to_string())
    }
}
