//! MMR-based sentence selection for summarization
//!
//! Implements Maximal Marginal Relevance (MMR) for selecting
//! diverse yet relevant sentences for extractive summarization.

use super::unit_vector::SentenceVectors;
use crate::types::ScoredSentence;
use std::cmp::Ordering;

/// Default relevance/diversity trade-off
pub const DEFAULT_LAMBDA: f64 = 0.6;

/// MMR-based sentence selector
#[derive(Debug, Clone)]
pub struct DiversitySelector {
    /// Lambda parameter for MMR (0 = diversity only, 1 = relevance only)
    lambda: f64,
}

impl Default for DiversitySelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Score descending, then index ascending
fn by_rank(a: &ScoredSentence, b: &ScoredSentence) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index().cmp(&b.index()))
}

impl DiversitySelector {
    pub fn new() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
        }
    }

    /// Set lambda (relevance vs diversity tradeoff)
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda.clamp(0.0, 1.0);
        self
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Select `k` sentences, returned in reading order.
    ///
    /// `scored` must be in reading order; position `i` pairs with embedding
    /// `i` in `vectors`. Without vectors (or with a vector count that does
    /// not match) this is a plain top-`k` by score.
    ///
    /// MMR formula: λ * score(s) - (1-λ) * max_{s' ∈ selected} sim(s, s')
    pub fn select(
        &self,
        scored: &[ScoredSentence],
        k: usize,
        vectors: Option<&SentenceVectors>,
    ) -> Vec<ScoredSentence> {
        let k = k.min(scored.len());
        if k == 0 {
            return Vec::new();
        }

        // Candidate positions in rank order
        let mut ranked: Vec<usize> = (0..scored.len()).collect();
        ranked.sort_by(|&a, &b| by_rank(&scored[a], &scored[b]));

        let mut selected: Vec<usize> = match vectors.filter(|v| v.len() == scored.len()) {
            Some(vectors) => self.mmr(scored, &ranked, k, vectors),
            None => ranked.into_iter().take(k).collect(),
        };

        selected.sort_unstable_by_key(|&pos| scored[pos].index());
        selected.into_iter().map(|pos| scored[pos].clone()).collect()
    }

    fn mmr(
        &self,
        scored: &[ScoredSentence],
        ranked: &[usize],
        k: usize,
        vectors: &SentenceVectors,
    ) -> Vec<usize> {
        // Seed with the top-ranked sentence
        let mut selected = vec![ranked[0]];
        let mut taken = vec![false; scored.len()];
        taken[ranked[0]] = true;

        while selected.len() < k {
            let mut best: Option<(usize, f64)> = None;

            for &pos in ranked {
                if taken[pos] {
                    continue;
                }

                let max_sim = selected
                    .iter()
                    .map(|&s| vectors.similarity(pos, s))
                    .fold(f64::NEG_INFINITY, f64::max);
                let mmr = self.lambda * scored[pos].score - (1.0 - self.lambda) * max_sim;

                // Strictly greater: earlier-ranked candidates win ties
                if best.map_or(true, |(_, b)| mmr > b) {
                    best = Some((pos, mmr));
                }
            }

            match best {
                Some((pos, _)) => {
                    taken[pos] = true;
                    selected.push(pos);
                }
                None => break,
            }
        }

        selected
    }
}
