//! Optional model capabilities
//!
//! Sentence embedding, abstractive rewriting and keyphrase extraction are
//! supplied by the host application. Each one is optional: when it is
//! missing, fails to load, or fails on a call, the engine takes a documented
//! lexical fallback instead of surfacing an error.
//!
//! Capabilities live in a [`CapabilityRegistry`] that is built once and
//! passed by reference into the pipeline. Loading is lazy and happens at most
//! once per registry (see [`LazyCapability`]).

pub mod hashing;
pub mod lazy;
pub mod registry;

pub use hashing::HashingEmbedder;
pub use lazy::{CapabilityStatus, LazyCapability};
pub use registry::{CapabilityRegistry, CapabilityReport};

use crate::errors::CapabilityError;
use serde::Serialize;

/// Result type for capability calls
pub type CapabilityResult<T> = std::result::Result<T, CapabilityError>;

/// Sentence embedding encoder
///
/// Must return one vector per input, all with the same dimensionality, and
/// must be deterministic for identical input.
pub trait Embedder: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Encode each sentence into a dense vector
    fn encode(&self, sentences: &[String]) -> CapabilityResult<Vec<Vec<f32>>>;
}

/// Abstractive text generator
pub trait AbstractiveGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Rewrite `text` into roughly `min_length..=max_length` output tokens
    fn summarize(&self, text: &str, min_length: usize, max_length: usize)
        -> CapabilityResult<String>;
}

/// Context-aware keyphrase extractor
pub trait KeyphraseExtractor: Send + Sync {
    fn name(&self) -> &str;

    /// Extract up to `request.top_n` scored phrases from `text`
    fn extract(&self, text: &str, request: &KeyphraseRequest)
        -> CapabilityResult<Vec<(String, f64)>>;
}

/// How a keyphrase extractor should trade relevance for diversity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DiversityMode {
    /// Plain relevance ranking
    None,
    /// Max-sum similarity over the `candidates` most relevant phrases
    MaxSum { candidates: usize },
    /// Maximal marginal relevance with the given diversity weight
    Mmr { diversity: f64 },
}

/// Parameters handed to a [`KeyphraseExtractor`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyphraseRequest {
    /// Inclusive word-count range of candidate phrases
    pub ngram_range: (usize, usize),
    /// Maximum phrases to return
    pub top_n: usize,
    /// Drop English stopwords from candidates
    pub remove_stopwords: bool,
    pub diversity: DiversityMode,
}

impl KeyphraseRequest {
    /// Unigrams and bigrams, English stopwords removed, max-sum diversity
    /// over the top 50 candidates.
    pub fn standard(top_n: usize) -> Self {
        Self {
            ngram_range: (1, 2),
            top_n,
            remove_stopwords: true,
            diversity: DiversityMode::MaxSum { candidates: 50 },
        }
    }
}

/// Record of a fallback taken during a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradationEvent {
    /// Pipeline component that degraded (e.g. `"scoring"`)
    pub component: &'static str,
    /// What failed
    pub failure: String,
    /// What was used instead
    pub fallback_used: &'static str,
}

impl DegradationEvent {
    pub fn new(component: &'static str, failure: impl Into<String>, fallback_used: &'static str) -> Self {
        Self {
            component,
            failure: failure.into(),
            fallback_used,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_keyphrase_request() {
        let request = KeyphraseRequest::standard(12);
        assert_eq!(request.ngram_range, (1, 2));
        assert_eq!(request.top_n, 12);
        assert!(request.remove_stopwords);
        assert_eq!(request.diversity, DiversityMode::MaxSum { candidates: 50 });
    }

    #[test]
    fn test_diversity_mode_serializes_tagged() {
        let value = serde_json::to_value(DiversityMode::MaxSum { candidates: 50 }).unwrap();
        assert_eq!(value["mode"], "max_sum");
        assert_eq!(value["candidates"], 50);
    }
}
