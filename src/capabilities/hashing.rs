//! Feature-hashing embedder.
//!
//! Produces deterministic dense vectors by hashing content words into a
//! fixed number of buckets. Far weaker than a neural encoder, but it needs no
//! model files, so it is useful offline and in tests.

use super::{CapabilityResult, Embedder};
use crate::nlp::tokenizer::Tokenizer;

/// Bag-of-words hashing encoder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// FNV-1a bucket for a term
    fn bucket(&self, term: &str) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % self.dimensions as u64) as usize
    }

    fn embed_one(&self, tokenizer: &Tokenizer<'_>, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        for word in tokenizer.words(text) {
            vec[self.bucket(&word)] += 1.0;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn encode(&self, sentences: &[String]) -> CapabilityResult<Vec<Vec<f32>>> {
        let tokenizer = Tokenizer::default();
        Ok(sentences
            .iter()
            .map(|s| self.embed_one(&tokenizer, s))
            .collect())
    }
}
