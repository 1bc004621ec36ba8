//! Word tokenization
//!
//! Tokens are lowercase runs of two or more word characters. This is the
//! tokenization the TF-IDF vectorizer is built on; the simpler
//! whitespace split is used for word counts and frequency ratios.

use crate::nlp::stopwords::StopwordFilter;
use regex::Regex;
use std::sync::OnceLock;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid word regex"))
}

/// Word tokenizer with stopword removal and n-gram expansion
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    stopwords: &'a StopwordFilter,
    /// Inclusive n-gram range
    ngram_range: (usize, usize),
}

impl Default for Tokenizer<'static> {
    fn default() -> Self {
        Self::new(StopwordFilter::english())
    }
}

impl<'a> Tokenizer<'a> {
    pub fn new(stopwords: &'a StopwordFilter) -> Self {
        Self {
            stopwords,
            ngram_range: (1, 1),
        }
    }

    /// Set the inclusive n-gram range (e.g. `(1, 2)` for words and bigrams)
    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        let min = min.max(1);
        self.ngram_range = (min, max.max(min));
        self
    }

    /// Lowercased content words, stopwords removed
    pub fn words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        word_re()
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.is_stopword(w))
            .map(str::to_string)
            .collect()
    }

    /// Terms for one document: every n-gram in the configured range, built
    /// over the stopword-filtered word sequence.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let (min_n, max_n) = self.ngram_range;
        if min_n == 1 && max_n == 1 {
            return words;
        }

        let mut terms = Vec::with_capacity(words.len() * (max_n - min_n + 1));
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            terms.extend(words.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of distinct lowercase whitespace-separated words
pub fn unique_word_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    let unique: rustc_hash::FxHashSet<&str> = lower.split_whitespace().collect();
    unique.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_lowercase_without_stopwords() {
        let tokenizer = Tokenizer::default();
        let words = tokenizer.words("The Quick brown fox jumps over a lazy dog.");
        assert!(words.contains(&"quick".to_string()));
        assert!(words.contains(&"fox".to_string()));
        assert!(!words.contains(&"the".to_string()));
        assert!(!words.contains(&"a".to_string()));
    }

    #[test]
    fn test_single_characters_dropped() {
        let filter = StopwordFilter::empty();
        let tokenizer = Tokenizer::new(&filter);
        let words = tokenizer.words("x y zz 7 42");
        assert_eq!(words, vec!["zz", "42"]);
    }

    #[test]
    fn test_bigrams_span_removed_stopwords() {
        let filter = StopwordFilter::from_list(&["of"]);
        let tokenizer = Tokenizer::new(&filter).with_ngram_range(1, 2);
        let terms = tokenizer.terms("analysis of variance results");
        assert_eq!(
            terms,
            vec![
                "analysis",
                "variance",
                "results",
                "analysis variance",
                "variance results"
            ]
        );
    }

    #[test]
    fn test_word_counts() {
        assert_eq!(word_count("  one two\nthree "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(unique_word_count("Data data DATA model"), 2);
    }
}
