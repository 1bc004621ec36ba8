//! Batch summarization
//!
//! Documents are summarized independently and in parallel. In
//! [`SummaryMode::Merged`] the cleaned texts are additionally joined with a
//! blank line and summarized as one document.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::runner::Summarizer;
use super::settings::SummaryMode;
use crate::types::{SummarizerConfig, SummaryResult};

/// Separator placed between documents in merged mode
pub const MERGE_SEPARATOR: &str = "\n\n";

/// One input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDocument {
    pub file_name: String,
    pub text: String,
}

impl BatchDocument {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}

/// Settings shared by every document in a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSettings {
    pub config: SummarizerConfig,
    pub mode: SummaryMode,
}

impl BatchSettings {
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            config,
            mode: SummaryMode::Separate,
        }
    }

    pub fn with_mode(mut self, mode: SummaryMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Summary of one document in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub file_name: String,
    #[serde(flatten)]
    pub result: SummaryResult,
}

/// Output of [`summarize_batch`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Per-document results, in input order
    pub documents: Vec<DocumentSummary>,
    pub is_merged: bool,
    /// Summary of all documents combined (merged mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged: Option<SummaryResult>,
}

/// Summarize every document, and in merged mode their concatenation.
///
/// Processing times are filled in: per document for each entry, and for the
/// whole batch on the merged result.
pub fn summarize_batch(
    summarizer: &Summarizer,
    documents: &[BatchDocument],
    settings: &BatchSettings,
) -> BatchResult {
    let start = Instant::now();
    info!(documents = documents.len(), mode = settings.mode.as_str(), "batch summarization");

    let summaries: Vec<DocumentSummary> = documents
        .par_iter()
        .map(|doc| {
            let doc_start = Instant::now();
            let result = summarizer
                .summarize_document(&doc.text, &settings.config)
                .with_processing_time(doc_start.elapsed());
            DocumentSummary {
                file_name: doc.file_name.clone(),
                result,
            }
        })
        .collect();

    let merged = match settings.mode {
        SummaryMode::Separate => None,
        SummaryMode::Merged => {
            let combined = summaries
                .iter()
                .map(|d| d.result.cleaned_original_text.as_str())
                .collect::<Vec<_>>()
                .join(MERGE_SEPARATOR);
            Some(
                summarizer
                    .summarize_document(&combined, &settings.config)
                    .with_processing_time(start.elapsed()),
            )
        }
    };

    BatchResult {
        documents: summaries,
        is_merged: merged.is_some(),
        merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, topic: &str, n: usize) -> BatchDocument {
        let text = (0..n)
            .map(|i| format!("Paragraph {i} describes {topic} in considerable practical detail."))
            .collect::<Vec<_>>()
            .join(" ");
        BatchDocument::new(name, text)
    }

    #[test]
    fn test_separate_mode_preserves_order() {
        let docs = vec![doc("a.txt", "tides", 10), doc("b.txt", "orbits", 12), doc("c.txt", "", 0)];
        let result = summarize_batch(&Summarizer::default(), &docs, &BatchSettings::default());

        assert!(!result.is_merged);
        assert!(result.merged.is_none());
        let names: Vec<&str> = result.documents.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(result.documents[1].result.metrics.original_sentences, 12);
        assert!(result.documents[2].result.is_degenerate());
    }

    #[test]
    fn test_merged_mode_combines_documents() {
        let docs = vec![doc("a.txt", "tides", 10), doc("b.txt", "orbits", 12)];
        let settings = BatchSettings::default().with_mode(SummaryMode::Merged);
        let result = summarize_batch(&Summarizer::default(), &docs, &settings);

        assert!(result.is_merged);
        let merged = result.merged.unwrap();
        assert_eq!(merged.metrics.original_sentences, 22);
        assert!(merged.cleaned_original_text.contains("tides"));
        assert!(merged.cleaned_original_text.contains("orbits"));
    }

    #[test]
    fn test_batch_json_shape() {
        let docs = vec![doc("a.txt", "tides", 10)];
        let result = summarize_batch(&Summarizer::default(), &docs, &BatchSettings::default());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isMerged"], false);
        assert_eq!(value["documents"][0]["fileName"], "a.txt");
        assert!(value["documents"][0]["sentenceScores"].is_array());
        assert!(value.get("merged").is_none());
    }
}
