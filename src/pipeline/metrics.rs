//! Summary metrics

use crate::nlp::tokenizer::word_count;
use crate::types::SummaryMetrics;

/// Percentage of words removed by summarization, in `[0, 100]`.
///
/// Zero when the original has no words. A summary longer than the original
/// (possible after abstractive rewriting) clamps to 0.
pub fn compression_ratio(original_words: usize, summary_words: usize) -> u32 {
    if original_words == 0 {
        return 0;
    }
    let ratio = 100.0 * (1.0 - summary_words as f64 / original_words as f64);
    ratio.round().clamp(0.0, 100.0) as u32
}

/// Metrics for a finished summary. `processing_time_ms` is left at 0.
pub fn compute_metrics(
    cleaned_text: &str,
    summary: &str,
    original_sentences: usize,
    summary_sentences: usize,
) -> SummaryMetrics {
    SummaryMetrics {
        compression_ratio: compression_ratio(word_count(cleaned_text), word_count(summary)),
        original_sentences,
        summary_sentences,
        processing_time_ms: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(0, 0), 0);
        assert_eq!(compression_ratio(100, 40), 60);
        assert_eq!(compression_ratio(3, 1), 67);
        assert_eq!(compression_ratio(10, 10), 0);
        assert_eq!(compression_ratio(10, 25), 0);
        assert_eq!(compression_ratio(10, 0), 100);
    }

    #[test]
    fn test_compute_metrics() {
        let metrics = compute_metrics("one two three four", "one two", 4, 2);
        assert_eq!(metrics.compression_ratio, 50);
        assert_eq!(metrics.original_sentences, 4);
        assert_eq!(metrics.summary_sentences, 2);
        assert_eq!(metrics.processing_time_ms, 0);
    }
}
