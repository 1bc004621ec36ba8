use std::sync::Arc;

use rapid_digest::capabilities::HashingEmbedder;
use rapid_digest::keywords::keyword_budget;
use rapid_digest::pipeline::observer::StageTimingObserver;
use rapid_digest::pipeline::validation::SettingsValidator;
use rapid_digest::types::NO_SENTENCES_SUMMARY;
use rapid_digest::{
    clean_text, summarize_batch, summarize_document, BatchDocument, BatchSettings,
    CapabilityRegistry, Domain, Embedder, RequestSettings, SpeedMode, Summarizer,
    SummarizerConfig, SummaryMode,
};

const SUBJECTS: &[&str] = &[
    "The city council",
    "A regional utility",
    "Independent auditors",
    "The transport agency",
    "Local schools",
    "Hospital administrators",
];

const ACTIONS: &[&str] = &[
    "reviewed the water budget",
    "published new safety figures",
    "expanded the cycling network",
    "delayed the bridge repairs",
    "approved a housing plan",
];

fn document(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "{} {} during meeting {} after long public consultation.",
                SUBJECTS[i % SUBJECTS.len()],
                ACTIONS[i % ACTIONS.len()],
                i + 1
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_thirty_sentences_balanced() {
    let result = summarize_document(&document(30), SpeedMode::Balanced, Domain::General, false);

    assert_eq!(result.metrics.original_sentences, 30);
    assert_eq!(result.metrics.summary_sentences, 15);
    assert!((3..=15).contains(&result.highlights.len()));
    assert_eq!(result.sentence_scores.len(), 30);
    assert!(result.sentence_scores.iter().all(|s| s.score >= 0.0));
    assert!(result.metrics.compression_ratio > 0);
}

#[test]
fn test_thorough_ten_sentences_keeps_all() {
    let result = summarize_document(&document(10), SpeedMode::Thorough, Domain::General, false);
    assert_eq!(result.metrics.summary_sentences, 10);
}

#[test]
fn test_summary_sentences_in_reading_order() {
    let text = document(25);
    let result = summarize_document(&text, SpeedMode::Fast, Domain::Journalistic, false);

    // Sentences appear in the summary in the same order as in the document.
    let positions: Vec<usize> = result
        .sentence_scores
        .iter()
        .filter_map(|s| result.summary.find(s.text()))
        .collect();
    assert_eq!(positions.len(), result.metrics.summary_sentences);
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn test_empty_and_short_input() {
    for text in ["", "   \n\n  ", "Short. Tiny. Small."] {
        let result = summarize_document(text, SpeedMode::Balanced, Domain::General, false);
        assert_eq!(result.summary, NO_SENTENCES_SUMMARY);
        assert!(result.sentence_scores.is_empty());
        assert_eq!(result.metrics.compression_ratio, 0);
    }
}

#[test]
fn test_page_footers_removed_before_summarizing() {
    let topics = [
        "Glaciers retreated faster than any model predicted for the decade.",
        "Coastal towns invested heavily in flood barriers and pumps.",
        "Farmers adjusted planting calendars to the longer dry season.",
        "Insurers raised premiums for properties near rivers.",
        "Researchers mapped heat islands across the largest cities.",
    ];
    let text = topics
        .iter()
        .enumerate()
        .map(|(i, body)| format!("{body}\nPage {} of 10", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    let cleaned = clean_text(&text);
    assert!(!cleaned.contains("Page"));

    let result = summarize_document(&text, SpeedMode::Fast, Domain::General, false);
    assert!(!result.summary.contains("Page"));
    assert_eq!(result.metrics.original_sentences, 5);
}

#[test]
fn test_keyword_budget_example() {
    assert_eq!(keyword_budget(10, 0.5), 8);
}

#[test]
fn test_embedder_registry_shared_across_threads() {
    let registry = Arc::new(
        CapabilityRegistry::empty()
            .with_embedder_loader(|| Ok(Arc::new(HashingEmbedder::new(128)) as Arc<dyn Embedder>)),
    );
    let summarizer = Summarizer::new(Arc::clone(&registry));
    let config = SummarizerConfig::new().with_domain(Domain::Academic);

    std::thread::scope(|scope| {
        for n in [12, 20, 30] {
            let summarizer = &summarizer;
            let config = &config;
            scope.spawn(move || {
                let result = summarizer.summarize_document(&document(n), config);
                assert_eq!(result.sentence_scores.len(), n);
            });
        }
    });

    assert_eq!(
        registry.report().embedder,
        rapid_digest::capabilities::CapabilityStatus::Ready
    );
}

#[test]
fn test_settings_to_batch() {
    let settings = RequestSettings::from_json(
        r#"{ "speedMode": "fast", "domain": "legal", "summaryMode": "merged", "fileName": "x" }"#,
    )
    .unwrap();
    let resolved = SettingsValidator::with_defaults().resolve(&settings).unwrap();
    assert_eq!(resolved.summary_mode, SummaryMode::Merged);
    assert_eq!(resolved.report.warnings().count(), 1);

    let docs = vec![
        BatchDocument::new("one.txt", document(8)),
        BatchDocument::new("two.txt", document(9)),
    ];
    let batch_settings = BatchSettings::new(resolved.config).with_mode(resolved.summary_mode);
    let result = summarize_batch(&Summarizer::default(), &docs, &batch_settings);

    assert_eq!(result.documents.len(), 2);
    let merged = result.merged.expect("merged summary");
    assert_eq!(merged.metrics.original_sentences, 17);
}

#[test]
fn test_observer_reports_no_degradation_without_capabilities() {
    let mut observer = StageTimingObserver::new();
    Summarizer::default().summarize_document_observed(
        &document(15),
        &SummarizerConfig::new(),
        &mut observer,
    );
    assert!(observer.degradations().is_empty());
    assert!(!observer.stages().is_empty());
}
