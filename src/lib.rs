//! # rapid-digest
//!
//! Extractive document summarization: TF-IDF and embedding-centrality
//! sentence scoring, MMR selection for a diverse summary, adaptive
//! highlight thresholding, and budgeted keyword extraction.
//!
//! Heavy model capabilities (sentence embeddings, abstractive rewriting,
//! keyphrase extraction) are optional. Register them in a
//! [`CapabilityRegistry`]; anything missing or failing degrades to a
//! lexical fallback and never fails the request.
//!
//! ```
//! use rapid_digest::{Summarizer, SummarizerConfig, SpeedMode};
//!
//! let text = "Solar capacity doubled across the region last year. \
//!             Grid operators struggled to balance intermittent supply. \
//!             Battery storage projects are now being approved faster.";
//! let config = SummarizerConfig::new().with_speed_mode(SpeedMode::Fast);
//! let result = Summarizer::default().summarize_document(text, &config);
//! assert_eq!(result.sentence_scores.len(), 3);
//! ```

pub mod capabilities;
pub mod errors;
pub mod keywords;
pub mod nlp;
pub mod pipeline;
pub mod scoring;
pub mod summarizer;
pub mod types;

use std::time::Instant;

pub use capabilities::{
    AbstractiveGenerator, CapabilityRegistry, Embedder, KeyphraseExtractor, KeyphraseRequest,
};
pub use errors::{CapabilityError, DigestError, Result};
pub use nlp::cleaner::clean_text;
pub use pipeline::{
    summarize_batch, BatchDocument, BatchResult, BatchSettings, PipelineObserver, RequestSettings,
    SettingsValidator, Summarizer, SummaryMode,
};
pub use types::{
    Domain, Keyword, ScoredSentence, Sentence, SpeedMode, SummarizerConfig, SummaryMetrics,
    SummaryResult,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize `text` without any model capabilities.
///
/// Convenience wrapper over [`Summarizer::summarize_document`] that also
/// records the processing time.
pub fn summarize_document(
    text: &str,
    speed_mode: SpeedMode,
    domain: Domain,
    use_abstractive: bool,
) -> SummaryResult {
    let start = Instant::now();
    let config = SummarizerConfig::new()
        .with_speed_mode(speed_mode)
        .with_domain(domain)
        .with_abstractive(use_abstractive);
    Summarizer::default()
        .summarize_document(text, &config)
        .with_processing_time(start.elapsed())
}
