//! Keyword extraction
//!
//! Prefers the context-aware [`KeyphraseExtractor`] capability and falls back
//! to a TF-IDF + frequency blend over naive sentences.

use crate::capabilities::{KeyphraseExtractor, KeyphraseRequest};
use crate::errors::{CapabilityError, DigestError, Result};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tfidf::TfidfVectorizer;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::Keyword;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::sync::OnceLock;

const TFIDF_WEIGHT: f64 = 0.7;
const FREQUENCY_WEIGHT: f64 = 0.3;
/// Candidate vocabulary per requested keyword
const CANDIDATES_PER_KEYWORD: usize = 3;
/// Keywords must be longer than this many characters
const MIN_KEYWORD_CHARS: usize = 3;

fn sentence_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("valid sentence break pattern"))
}

/// Highest score first, ties alphabetical
fn by_score(a: &Keyword, b: &Keyword) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.word.cmp(&b.word))
}

/// Lexical keyword extractor
#[derive(Debug, Clone)]
pub struct KeywordExtractor<'a> {
    stopwords: &'a StopwordFilter,
}

impl Default for KeywordExtractor<'static> {
    fn default() -> Self {
        Self::new(StopwordFilter::english())
    }
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(stopwords: &'a StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Keywords from the keyphrase capability, scores clamped into `[0, 1]`
    /// and ordered by score.
    pub fn extract_with(
        &self,
        text: &str,
        top_n: usize,
        extractor: &dyn KeyphraseExtractor,
    ) -> Result<Vec<Keyword>> {
        let request = KeyphraseRequest::standard(top_n);
        let phrases = extractor.extract(text, &request)?;

        if phrases.iter().any(|(_, score)| score.is_nan()) {
            return Err(CapabilityError::malformed(extractor.name(), "NaN keyphrase score").into());
        }

        let mut keywords: Vec<Keyword> = phrases
            .into_iter()
            .map(|(word, score)| Keyword::new(word, score.clamp(0.0, 1.0)))
            .collect();
        keywords.sort_by(by_score);
        keywords.truncate(top_n);
        Ok(keywords)
    }

    /// TF-IDF + frequency fallback.
    ///
    /// Terms are unigrams and bigrams; each scores `0.7 * Σ tfidf + 0.3 *
    /// frequency ratio`, where the ratio counts whole lowercase whitespace
    /// tokens (so bigrams contribute TF-IDF only).
    pub fn extract_lexical(&self, text: &str, top_n: usize) -> Result<Vec<Keyword>> {
        let mut keywords = self.lexical_candidates(text, top_n)?;
        keywords.truncate(top_n);
        Ok(keywords)
    }

    /// Every scored term from the capped vocabulary, best first
    fn lexical_candidates(&self, text: &str, top_n: usize) -> Result<Vec<Keyword>> {
        let sentences: Vec<&str> = sentence_breaks()
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let vectorizer = TfidfVectorizer::new(Tokenizer::new(self.stopwords).with_ngram_range(1, 2))
            .with_max_features(top_n * CANDIDATES_PER_KEYWORD);
        let matrix = match vectorizer.fit_transform(&sentences) {
            Ok(matrix) => matrix,
            Err(DigestError::EmptyVocabulary) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let mut frequency: FxHashMap<&str, usize> = FxHashMap::default();
        for &token in &tokens {
            if token.chars().count() > MIN_KEYWORD_CHARS {
                *frequency.entry(token).or_insert(0) += 1;
            }
        }
        let total = tokens.len() as f64;

        let mut keywords: Vec<Keyword> = matrix
            .column_sums()
            .into_iter()
            .filter(|(term, _)| term.chars().count() > MIN_KEYWORD_CHARS)
            .map(|(term, tfidf)| {
                let ratio = match frequency.get(term) {
                    Some(&count) if total > 0.0 => count as f64 / total,
                    _ => 0.0,
                };
                Keyword::new(term, TFIDF_WEIGHT * tfidf + FREQUENCY_WEIGHT * ratio)
            })
            .collect();

        keywords.sort_by(by_score);
        Ok(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::mocks::{FailingCapability, FixedKeyphrases};

    const TEXT: &str = "Renewable energy adoption accelerated this year. \
        Solar installations grew quickly across rural regions! \
        Renewable energy investment also reached record levels. \
        Policy makers praised renewable energy incentives?";

    #[test]
    fn test_lexical_ranks_repeated_phrase() {
        let keywords = KeywordExtractor::default().extract_lexical(TEXT, 8).unwrap();
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= 8);
        let top: Vec<&str> = keywords.iter().take(3).map(|k| k.word.as_str()).collect();
        assert!(top.contains(&"renewable") || top.contains(&"renewable energy"));
    }

    #[test]
    fn test_lexical_filters_short_terms_and_sorts() {
        let keywords = KeywordExtractor::default().extract_lexical(TEXT, 20).unwrap();
        assert!(keywords.iter().all(|k| k.word.chars().count() > 3));
        for pair in keywords.windows(2) {
            assert!(by_score(&pair[0], &pair[1]) != Ordering::Greater);
        }
    }

    #[test]
    fn test_lexical_empty_text() {
        let extractor = KeywordExtractor::default();
        assert!(extractor.extract_lexical("", 10).unwrap().is_empty());
        assert!(extractor.extract_lexical("... !!! ???", 10).unwrap().is_empty());
        assert!(extractor.extract_lexical("The and of. It is.", 10).unwrap().is_empty());
    }

    #[test]
    fn test_capability_scores_clamped() {
        let extractor = FixedKeyphrases(vec![
            ("solar power".to_string(), 1.7),
            ("grid".to_string(), 0.4),
            ("noise".to_string(), -0.2),
        ]);
        let keywords = KeywordExtractor::default()
            .extract_with(TEXT, 10, &extractor)
            .unwrap();
        assert_eq!(
            keywords,
            vec![
                Keyword::new("solar power", 1.0),
                Keyword::new("grid", 0.4),
                Keyword::new("noise", 0.0),
            ]
        );
    }

    #[test]
    fn test_capability_order_follows_clamped_score() {
        let extractor = FixedKeyphrases(vec![
            ("planning".to_string(), 0.2),
            ("energy".to_string(), 1.4),
            ("storage".to_string(), 1.0),
            ("grid".to_string(), 0.5),
        ]);
        let keywords = KeywordExtractor::default()
            .extract_with(TEXT, 3, &extractor)
            .unwrap();
        assert_eq!(
            keywords,
            vec![
                Keyword::new("energy", 1.0),
                Keyword::new("storage", 1.0),
                Keyword::new("grid", 0.5),
            ]
        );
    }

    #[test]
    fn test_lexical_score_blend() {
        let text = "Harbor cranes unload cargo. Harbor pilots guide ships. Storms close ports.";
        let stopwords = StopwordFilter::english();
        let keywords = KeywordExtractor::new(stopwords).extract_lexical(text, 10).unwrap();

        let sentences = ["Harbor cranes unload cargo", "Harbor pilots guide ships", "Storms close ports"];
        let matrix = TfidfVectorizer::new(Tokenizer::new(stopwords).with_ngram_range(1, 2))
            .with_max_features(30)
            .fit_transform(&sentences)
            .unwrap();
        let tfidf = matrix
            .column_sums()
            .into_iter()
            .find(|&(term, _)| term == "harbor")
            .map(|(_, sum)| sum)
            .unwrap();
        // "harbor" is 2 of the 11 whitespace tokens
        let expected = 0.7 * tfidf + 0.3 * (2.0 / 11.0);

        let harbor = keywords.iter().find(|k| k.word == "harbor").unwrap();
        assert!((harbor.score - expected).abs() < 1e-12);
        assert_eq!(keywords[0].word, "harbor");
    }

    #[test]
    fn test_lexical_vocabulary_capped() {
        let extractor = KeywordExtractor::default();
        for top_n in [1, 2, 4] {
            let candidates = extractor.lexical_candidates(TEXT, top_n).unwrap();
            assert!(!candidates.is_empty());
            assert!(candidates.len() <= top_n * 3);
        }
    }

    #[test]
    fn test_ties_broken_alphabetically() {
        let mut keywords = vec![
            Keyword::new("zeta", 0.5),
            Keyword::new("alpha", 0.5),
            Keyword::new("mid", 0.9),
        ];
        keywords.sort_by(by_score);
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(words, vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_capability_failure_is_error() {
        let result = KeywordExtractor::default().extract_with(TEXT, 10, &FailingCapability);
        assert!(matches!(result, Err(DigestError::Capability(_))));
    }
}
