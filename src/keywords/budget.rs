//! Keyword budget
//!
//! Documents with more highlights cover more topics and get more keywords;
//! lexically richer documents get up to 80% more on top.

use crate::nlp::tokenizer::unique_word_count;

pub const MIN_KEYWORDS: usize = 8;
pub const MAX_KEYWORDS: usize = 60;

/// Unique words at which a document counts as fully complex
const COMPLEXITY_SATURATION: f64 = 1000.0;
const COMPLEXITY_BOOST: f64 = 0.8;

/// Lexical complexity in `[0, 1]`: unique lowercase words / 1000, capped
pub fn document_complexity(text: &str) -> f64 {
    (unique_word_count(text) as f64 / COMPLEXITY_SATURATION).min(1.0)
}

/// Number of keywords to extract for a given highlight count and complexity
pub fn keyword_budget(num_highlights: usize, complexity: f64) -> usize {
    let base = (num_highlights / 2).max(5) as f64;
    let scaled = (base * (1.0 + COMPLEXITY_BOOST * complexity.clamp(0.0, 1.0))).round() as usize;
    scaled.clamp(MIN_KEYWORDS, MAX_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_floor() {
        // base 5, ×1.4 = 7 → raised to 8
        assert_eq!(keyword_budget(10, 0.5), 8);
        assert_eq!(keyword_budget(0, 0.0), 8);
    }

    #[test]
    fn test_budget_scales_with_highlights() {
        // base 20, ×1.8 = 36
        assert_eq!(keyword_budget(40, 1.0), 36);
        // base 15, ×1.4 = 21
        assert_eq!(keyword_budget(30, 0.5), 21);
    }

    #[test]
    fn test_budget_ceiling() {
        assert_eq!(keyword_budget(200, 1.0), 60);
    }

    #[test]
    fn test_complexity() {
        assert_eq!(document_complexity(""), 0.0);
        assert!((document_complexity("Alpha alpha beta") - 0.002).abs() < 1e-12);

        let rich: String = (0..1500).map(|i| format!("w{i} ")).collect();
        assert_eq!(document_complexity(&rich), 1.0);
    }
}
