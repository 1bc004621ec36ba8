//! Adaptive highlight selection
//!
//! A sentence is a highlight when its score reaches `mean + 0.5 * stddev`
//! of the document's score distribution. The count is then clamped to
//! `[min(3, N), max(5, ceil(N / 2))]`.

use crate::types::ScoredSentence;

/// Picks salient sentences independently of the summary
#[derive(Debug, Clone)]
pub struct HighlightSelector {
    /// Standard deviations above the mean
    spread: f64,
    min_highlights: usize,
    /// Lower bound on the maximum highlight count
    max_floor: usize,
}

impl Default for HighlightSelector {
    fn default() -> Self {
        Self {
            spread: 0.5,
            min_highlights: 3,
            max_floor: 5,
        }
    }
}

impl HighlightSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Allowed highlight count range for `n` sentences
    pub fn bounds(&self, n: usize) -> (usize, usize) {
        (self.min_highlights.min(n), self.max_floor.max(n.div_ceil(2)))
    }

    /// Score threshold: mean plus `spread` population standard deviations
    ///
    /// Uniform scores return the shared score itself, so rounding in the
    /// mean cannot lift the threshold above every sentence.
    pub fn threshold(&self, scored: &[ScoredSentence]) -> f64 {
        let Some(first) = scored.first() else {
            return 0.0;
        };
        if scored.iter().all(|s| s.score == first.score) {
            return first.score;
        }
        let n = scored.len() as f64;
        let mean = scored.iter().map(|s| s.score).sum::<f64>() / n;
        let variance = scored.iter().map(|s| (s.score - mean).powi(2)).sum::<f64>() / n;
        mean + self.spread * variance.sqrt()
    }

    /// Highlights, highest score first (ties: lower index first)
    pub fn select(&self, scored: &[ScoredSentence]) -> Vec<ScoredSentence> {
        let mut ranked: Vec<&ScoredSentence> = scored.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.index().cmp(&b.index()))
        });

        let threshold = self.threshold(scored);
        let above = ranked.iter().take_while(|s| s.score >= threshold).count();
        let (min, max) = self.bounds(scored.len());

        ranked
            .into_iter()
            .take(above.clamp(min, max))
            .cloned()
            .collect()
    }
}
