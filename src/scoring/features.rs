//! Sentence importance scoring
//!
//! A sentence's score starts from its lexical weight (the sum of its TF-IDF
//! row) optionally blended with its semantic centrality, then passes through
//! a chain of multiplicative heuristics: position, domain cues, length and
//! numeric content.

use super::domain::domain_multiplier;
use crate::errors::Result;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tfidf::TfidfVectorizer;
use crate::nlp::tokenizer::Tokenizer;
use crate::summarizer::unit_vector::SentenceVectors;
use crate::types::{Domain, ScoredSentence, Sentence};

/// Vocabulary cap for sentence-level TF-IDF
pub const MAX_FEATURES: usize = 500;

/// Weight of the lexical score when semantic centrality is available
const LEXICAL_WEIGHT: f64 = 0.6;
const SEMANTIC_WEIGHT: f64 = 0.4;

/// Semantic score used when no embeddings are available
pub const NEUTRAL_SEMANTIC: f64 = 0.5;

/// Score assigned to every sentence when scoring fails
pub const UNIFORM_SCORE: f64 = 1.0;

/// Position multiplier: the opening sentence, the two after it, and the
/// closing sentence carry more weight.
pub fn position_multiplier(index: usize, num_sentences: usize) -> f64 {
    let mut m = if index == 0 {
        1.2
    } else if index < 3 {
        1.1
    } else {
        1.0
    };
    if index + 1 == num_sentences {
        m *= 1.1;
    }
    m
}

/// Length multiplier: prefer medium-length sentences
pub fn length_multiplier(word_count: usize) -> f64 {
    if (10..=30).contains(&word_count) {
        1.1
    } else if !(5..=50).contains(&word_count) {
        0.8
    } else {
        1.0
    }
}

/// Numeric-content multiplier (dates, statistics)
pub fn numeric_multiplier(text: &str) -> f64 {
    if text.chars().any(|c| c.is_ascii_digit()) {
        1.05
    } else {
        1.0
    }
}

/// Heuristic sentence scorer
#[derive(Debug, Clone)]
pub struct FeatureScorer<'a> {
    stopwords: &'a StopwordFilter,
    max_features: usize,
}

impl Default for FeatureScorer<'static> {
    fn default() -> Self {
        Self::new(StopwordFilter::english())
    }
}

impl<'a> FeatureScorer<'a> {
    pub fn new(stopwords: &'a StopwordFilter) -> Self {
        Self {
            stopwords,
            max_features: MAX_FEATURES,
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features.max(1);
        self
    }

    /// Score every sentence, in order.
    ///
    /// `vectors`, when present, must hold one embedding per sentence;
    /// otherwise it is ignored.
    pub fn try_score(
        &self,
        sentences: &[Sentence],
        domain: Domain,
        vectors: Option<&SentenceVectors>,
    ) -> Result<Vec<ScoredSentence>> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let vectorizer = TfidfVectorizer::new(Tokenizer::new(self.stopwords))
            .with_max_features(self.max_features);
        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        let matrix = vectorizer.fit_transform(&texts)?;

        let vectors = vectors.filter(|v| v.len() == sentences.len());
        let n = sentences.len();

        let scored = sentences
            .iter()
            .enumerate()
            .map(|(i, sentence)| {
                let lexical = matrix.row_sum(i);
                let mut score = match vectors {
                    Some(v) => LEXICAL_WEIGHT * lexical + SEMANTIC_WEIGHT * v.centrality(i),
                    None => lexical,
                };

                score *= position_multiplier(i, n);
                score *= domain_multiplier(domain, i, &sentence.text);
                score *= length_multiplier(sentence.word_count());
                score *= numeric_multiplier(&sentence.text);

                ScoredSentence::new(sentence.clone(), score.max(0.0))
            })
            .collect();

        Ok(scored)
    }

    /// Score every sentence, falling back to [`uniform`] on failure.
    pub fn score(
        &self,
        sentences: &[Sentence],
        domain: Domain,
        vectors: Option<&SentenceVectors>,
    ) -> Vec<ScoredSentence> {
        self.try_score(sentences, domain, vectors)
            .unwrap_or_else(|_| uniform(sentences))
    }
}

/// Every sentence scored [`UNIFORM_SCORE`]
pub fn uniform(sentences: &[Sentence]) -> Vec<ScoredSentence> {
    sentences
        .iter()
        .map(|s| ScoredSentence::new(s.clone(), UNIFORM_SCORE))
        .collect()
}
