//! TF-IDF vectorization over a small in-memory corpus
//!
//! Each input string is one document. Weights are raw term counts times a
//! smoothed inverse document frequency, `ln((1 + n) / (1 + df)) + 1`, and
//! every row is L2-normalized. When a vocabulary cap is set, the terms with
//! the highest corpus frequency are kept (ties broken alphabetically).

use crate::errors::{DigestError, Result};
use crate::nlp::tokenizer::Tokenizer;
use rustc_hash::{FxHashMap, FxHashSet};

/// Sparse TF-IDF matrix: one row per document, `(term_id, weight)` entries
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    /// Vocabulary in alphabetical order; term ids index into it
    vocabulary: Vec<String>,
    /// Inverse document frequency per term id
    idf: Vec<f64>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl TfidfMatrix {
    pub fn num_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self, term_id: usize) -> f64 {
        self.idf.get(term_id).copied().unwrap_or(0.0)
    }

    /// Non-zero entries of a document row
    pub fn row(&self, doc: usize) -> &[(usize, f64)] {
        self.rows.get(doc).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of all weights in a document row
    pub fn row_sum(&self, doc: usize) -> f64 {
        self.row(doc).iter().map(|&(_, w)| w).sum()
    }

    /// Per-term weight summed across every document
    pub fn column_sums(&self) -> Vec<(&str, f64)> {
        let mut sums = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for &(term, weight) in row {
                sums[term] += weight;
            }
        }
        self.vocabulary
            .iter()
            .map(String::as_str)
            .zip(sums)
            .filter(|&(_, sum)| sum > 0.0)
            .collect()
    }
}

/// TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer<'a> {
    tokenizer: Tokenizer<'a>,
    max_features: Option<usize>,
}

impl Default for TfidfVectorizer<'static> {
    fn default() -> Self {
        Self::new(Tokenizer::default())
    }
}

impl<'a> TfidfVectorizer<'a> {
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        Self {
            tokenizer,
            max_features: None,
        }
    }

    /// Cap the vocabulary to the `max` most frequent terms
    pub fn with_max_features(mut self, max: usize) -> Self {
        self.max_features = Some(max);
        self
    }

    /// Learn the vocabulary from `docs` and return their TF-IDF rows.
    ///
    /// Fails with [`DigestError::EmptyVocabulary`] if no document contains a
    /// single non-stopword term.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<TfidfMatrix> {
        let doc_terms: Vec<Vec<String>> = docs
            .iter()
            .map(|d| self.tokenizer.terms(d.as_ref()))
            .collect();

        // Corpus frequency and document frequency per term
        let mut totals: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
        for terms in &doc_terms {
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            for term in terms {
                let entry = totals.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(term.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        if totals.is_empty() {
            return Err(DigestError::EmptyVocabulary);
        }

        let mut kept: Vec<(&str, usize, usize)> = totals
            .into_iter()
            .map(|(term, (total, df))| (term, total, df))
            .collect();
        if let Some(max) = self.max_features {
            if kept.len() > max {
                kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                kept.truncate(max);
            }
        }
        if kept.is_empty() {
            return Err(DigestError::EmptyVocabulary);
        }
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let n = docs.len() as f64;
        let vocabulary: Vec<String> = kept.iter().map(|(t, _, _)| t.to_string()).collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|&(_, _, df)| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let term_ids: FxHashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(id, t)| (t.as_str(), id))
            .collect();

        let rows = doc_terms
            .iter()
            .map(|terms| {
                let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
                for term in terms {
                    if let Some(&id) = term_ids.get(term.as_str()) {
                        *counts.entry(id).or_insert(0.0) += 1.0;
                    }
                }

                let mut row: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(id, tf)| (id, tf * idf[id]))
                    .collect();
                row.sort_by_key(|&(id, _)| id);

                let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for entry in &mut row {
                        entry.1 /= norm;
                    }
                }
                row
            })
            .collect();

        Ok(TfidfMatrix {
            vocabulary,
            idf,
            rows,
        })
    }
}
