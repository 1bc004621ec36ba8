//! Core data types
//!
//! Everything here is created per request and dropped with the result.
//! The serialized field names follow the JSON contract consumed by the
//! front end (`sentenceScores`, `compressionRatio`, ...).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary text returned when segmentation yields nothing usable.
pub const NO_SENTENCES_SUMMARY: &str = "No valid sentences found.";

/// A candidate sentence from the segmented document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text (trimmed)
    #[serde(rename = "sentence")]
    pub text: String,
    /// Position in the filtered sentence sequence (reading order)
    pub index: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A sentence paired with its importance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    #[serde(flatten)]
    pub sentence: Sentence,
    /// Importance (non-negative; higher is more important)
    pub score: f64,
}

impl ScoredSentence {
    pub fn new(sentence: Sentence, score: f64) -> Self {
        Self { sentence, score }
    }

    pub fn index(&self) -> usize {
        self.sentence.index
    }

    pub fn text(&self) -> &str {
        &self.sentence.text
    }
}

/// A ranked keyword or keyphrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// The word or phrase
    pub word: String,
    pub score: f64,
}

impl Keyword {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Extractive coverage preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedMode {
    /// ~35% of sentences, between 5 and 12
    Fast,
    /// ~50% of sentences, between 8 and 25
    #[default]
    Balanced,
    /// ~70% of sentences, between 10 and 50
    Thorough,
}

impl SpeedMode {
    /// Parse a recognized speed mode, `None` otherwise.
    pub fn try_parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fast" => Some(SpeedMode::Fast),
            "balanced" => Some(SpeedMode::Balanced),
            "thorough" => Some(SpeedMode::Thorough),
            _ => None,
        }
    }

    /// Returns the user-facing name used in JSON and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }

    /// Coverage fraction and `[min, max]` bounds for the target count.
    pub fn coverage(&self) -> (f64, usize, usize) {
        match self {
            Self::Fast => (0.35, 5, 12),
            Self::Balanced => (0.50, 8, 25),
            Self::Thorough => (0.70, 10, 50),
        }
    }

    /// Number of sentences the extractive summary should contain for a
    /// document of `num_sentences` sentences.
    pub fn target_sentences(&self, num_sentences: usize) -> usize {
        let (fraction, min, max) = self.coverage();
        let raw = (num_sentences as f64 * fraction).floor() as usize;
        raw.clamp(min, max).min(num_sentences)
    }
}

/// Unrecognized values fall back to [`SpeedMode::Balanced`].
impl std::str::FromStr for SpeedMode {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(SpeedMode::try_parse(value).unwrap_or_default())
    }
}

/// Document genre, controls the heuristic keyword boosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    General,
    Academic,
    Legal,
    Journalistic,
}

impl Domain {
    /// Parse a recognized domain, `None` otherwise.
    pub fn try_parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "general" => Some(Domain::General),
            "academic" => Some(Domain::Academic),
            "legal" => Some(Domain::Legal),
            "journalistic" | "news" => Some(Domain::Journalistic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Academic => "academic",
            Self::Legal => "legal",
            Self::Journalistic => "journalistic",
        }
    }
}

/// Unrecognized values fall back to [`Domain::General`] (no boost).
impl std::str::FromStr for Domain {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Domain::try_parse(value).unwrap_or_default())
    }
}

/// Per-request summarizer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerConfig {
    /// Target extractive coverage
    pub speed_mode: SpeedMode,
    /// Heuristic boost profile
    pub domain: Domain,
    /// Rewrite the extractive summary through the abstractive generator
    pub use_abstractive: bool,
    /// MMR trade-off (0 = diversity only, 1 = relevance only)
    pub mmr_lambda: f64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            speed_mode: SpeedMode::Balanced,
            domain: Domain::General,
            use_abstractive: false,
            mmr_lambda: 0.6,
        }
    }
}

impl SummarizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed_mode(mut self, speed_mode: SpeedMode) -> Self {
        self.speed_mode = speed_mode;
        self
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_abstractive(mut self, use_abstractive: bool) -> Self {
        self.use_abstractive = use_abstractive;
        self
    }

    /// Set the MMR trade-off, clamped to `[0, 1]`
    pub fn with_mmr_lambda(mut self, lambda: f64) -> Self {
        self.mmr_lambda = lambda.clamp(0.0, 1.0);
        self
    }
}

/// Derived summary metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    /// Percentage of words removed, `0..=100`
    pub compression_ratio: u32,
    pub original_sentences: usize,
    pub summary_sentences: usize,
    /// Wall-clock milliseconds for the whole request, set by the caller
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
}

/// Complete output of one summarization request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    /// Salient sentences, highest score first
    pub highlights: Vec<ScoredSentence>,
    /// Keywords, highest score first
    pub keywords: Vec<Keyword>,
    /// One entry per segmented sentence, reading order
    pub sentence_scores: Vec<ScoredSentence>,
    pub metrics: SummaryMetrics,
    #[serde(rename = "originalText")]
    pub cleaned_original_text: String,
}

impl SummaryResult {
    /// Result for a document with no usable sentences.
    pub fn degenerate(cleaned_original_text: impl Into<String>) -> Self {
        Self {
            summary: NO_SENTENCES_SUMMARY.to_string(),
            highlights: Vec::new(),
            keywords: Vec::new(),
            sentence_scores: Vec::new(),
            metrics: SummaryMetrics::default(),
            cleaned_original_text: cleaned_original_text.into(),
        }
    }

    /// Whether this is the degenerate no-sentence result.
    pub fn is_degenerate(&self) -> bool {
        self.sentence_scores.is_empty()
    }

    /// Record the caller-measured wall-clock time of the request.
    pub fn with_processing_time(mut self, elapsed: Duration) -> Self {
        self.metrics.processing_time_ms = elapsed.as_millis().min(u64::MAX as u128) as u64;
        self
    }
}
