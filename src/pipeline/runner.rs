//! Pipeline runner: orchestrates stage execution and fallbacks.
//!
//! The [`Summarizer`] owns the stateless stage components and a shared
//! [`CapabilityRegistry`]. Calling [`Summarizer::summarize_document`] runs
//! every stage in order, notifying an optional [`PipelineObserver`] at each
//! boundary.
//!
//! # Stages
//!
//! | Stage | Component | Fallback |
//! |-------|-----------|----------|
//! | clean | [`TextCleaner`] | none |
//! | segment | [`SentenceSegmenter`] | degenerate result on zero sentences |
//! | embed | [`Embedder`](crate::capabilities::Embedder) | lexical-only scoring, top-K selection |
//! | score | [`FeatureScorer`] | uniform scores |
//! | select | [`DiversitySelector`] | none |
//! | highlight | [`HighlightSelector`] | none |
//! | refine | [`AbstractiveRefiner`] | keep the extractive summary |
//! | keywords | [`KeywordExtractor`] | lexical extractor, then empty list |
//! | metrics | [`compute_metrics`] | none |

use crate::capabilities::{CapabilityRegistry, DegradationEvent};
use crate::errors::CapabilityError;
use crate::keywords::{document_complexity, keyword_budget, KeywordExtractor};
use crate::nlp::cleaner::TextCleaner;
use crate::nlp::segmenter::SentenceSegmenter;
use crate::pipeline::metrics::compute_metrics;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_CLEAN,
    STAGE_EMBED, STAGE_HIGHLIGHT, STAGE_KEYWORDS, STAGE_METRICS, STAGE_REFINE, STAGE_SCORE,
    STAGE_SEGMENT, STAGE_SELECT,
};
use crate::scoring::features::{uniform, FeatureScorer};
use crate::summarizer::unit_vector::SentenceVectors;
use crate::summarizer::{AbstractiveRefiner, DiversitySelector, HighlightSelector};
use crate::types::{Keyword, Sentence, SummarizerConfig, SummaryResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Enter a tracing span for a pipeline stage. The span closes at the end of
/// the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Log a fallback and hand it to the observer.
fn degrade(observer: &mut impl PipelineObserver, event: DegradationEvent) {
    warn!(
        component = event.component,
        failure = %event.failure,
        fallback = event.fallback_used,
        "degraded to fallback"
    );
    observer.on_degradation(&event);
}

/// Document summarizer
#[derive(Debug, Clone)]
pub struct Summarizer {
    registry: Arc<CapabilityRegistry>,
    cleaner: TextCleaner,
    segmenter: SentenceSegmenter,
    scorer: FeatureScorer<'static>,
    highlighter: HighlightSelector,
    refiner: AbstractiveRefiner,
    keywords: KeywordExtractor<'static>,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(Arc::new(CapabilityRegistry::empty()))
    }
}

impl Summarizer {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            registry,
            cleaner: TextCleaner::new(),
            segmenter: SentenceSegmenter::new(),
            scorer: FeatureScorer::default(),
            highlighter: HighlightSelector::new(),
            refiner: AbstractiveRefiner::new(),
            keywords: KeywordExtractor::default(),
        }
    }

    pub fn with_segmenter(mut self, segmenter: SentenceSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_refiner(mut self, refiner: AbstractiveRefiner) -> Self {
        self.refiner = refiner;
        self
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Summarize one document.
    pub fn summarize_document(&self, text: &str, config: &SummarizerConfig) -> SummaryResult {
        self.summarize_document_observed(text, config, &mut NoopObserver)
    }

    /// Summarize one document, reporting each stage to `observer`.
    ///
    /// Never fails: every capability or computation failure degrades to a
    /// documented fallback. `metrics.processing_time_ms` is left at 0.
    pub fn summarize_document_observed(
        &self,
        text: &str,
        config: &SummarizerConfig,
        observer: &mut impl PipelineObserver,
    ) -> SummaryResult {
        let _request = tracing::debug_span!(
            "summarize_document",
            speed_mode = config.speed_mode.as_str(),
            domain = config.domain.as_str(),
            use_abstractive = config.use_abstractive
        )
        .entered();

        // Stage 0: Clean
        let cleaned = {
            trace_stage!(STAGE_CLEAN);
            observer.on_stage_start(STAGE_CLEAN);
            let clock = StageClock::start();
            let cleaned = self.cleaner.clean(text);
            observer.on_stage_end(STAGE_CLEAN, &StageReport::new(clock.elapsed()));
            cleaned
        };

        // Stage 1: Segment
        let sentences = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let sentences = self.segmenter.segment(&cleaned);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(sentences.len())
                .build();
            observer.on_stage_end(STAGE_SEGMENT, &report);
            observer.on_sentences(&sentences);
            sentences
        };

        if sentences.is_empty() {
            debug!("no usable sentences; returning degenerate result");
            return SummaryResult::degenerate(cleaned);
        }

        let n = sentences.len();
        let k = config.speed_mode.target_sentences(n);
        debug!(sentences = n, target = k, "extractive target");

        // Stage 2: Embed (once, shared by scoring and selection)
        let vectors = {
            trace_stage!(STAGE_EMBED);
            observer.on_stage_start(STAGE_EMBED);
            let clock = StageClock::start();
            let vectors = self.embed(&sentences, observer);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(vectors.as_ref().map_or(0, SentenceVectors::len))
                .degraded(vectors.is_none())
                .build();
            observer.on_stage_end(STAGE_EMBED, &report);
            vectors
        };

        // Stage 3: Score
        let scores = {
            trace_stage!(STAGE_SCORE);
            observer.on_stage_start(STAGE_SCORE);
            let clock = StageClock::start();
            let (scores, degraded) =
                match self.scorer.try_score(&sentences, config.domain, vectors.as_ref()) {
                    Ok(scores) => (scores, false),
                    Err(e) => {
                        degrade(observer, DegradationEvent::new("scoring", e.to_string(), "uniform scores"));
                        (uniform(&sentences), true)
                    }
                };
            let report = StageReportBuilder::new(clock.elapsed())
                .items(scores.len())
                .degraded(degraded)
                .build();
            observer.on_stage_end(STAGE_SCORE, &report);
            observer.on_scores(&scores);
            scores
        };

        // Stage 4: Select
        let selected = {
            trace_stage!(STAGE_SELECT);
            observer.on_stage_start(STAGE_SELECT);
            let clock = StageClock::start();
            let selected = DiversitySelector::new()
                .with_lambda(config.mmr_lambda)
                .select(&scores, k, vectors.as_ref());
            let report = StageReportBuilder::new(clock.elapsed())
                .items(selected.len())
                .build();
            observer.on_stage_end(STAGE_SELECT, &report);
            selected
        };
        let extractive = selected
            .iter()
            .map(|s| s.text())
            .collect::<Vec<_>>()
            .join(" ");

        // Stage 5: Highlight
        let highlights = {
            trace_stage!(STAGE_HIGHLIGHT);
            observer.on_stage_start(STAGE_HIGHLIGHT);
            let clock = StageClock::start();
            let highlights = self.highlighter.select(&scores);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(highlights.len())
                .build();
            observer.on_stage_end(STAGE_HIGHLIGHT, &report);
            highlights
        };

        // Stage 6: Refine (optional)
        let summary = if config.use_abstractive && self.refiner.applies_to(selected.len()) {
            trace_stage!(STAGE_REFINE);
            observer.on_stage_start(STAGE_REFINE);
            let clock = StageClock::start();
            let refined = self
                .registry
                .generator()
                .and_then(|generator| self.refiner.refine(&extractive, generator.as_ref()));
            let (summary, degraded) = match refined {
                Ok(summary) => (summary, false),
                Err(e) => {
                    degrade(observer, DegradationEvent::new("refine", e.to_string(), "extractive summary"));
                    (extractive, true)
                }
            };
            let report = StageReportBuilder::new(clock.elapsed()).degraded(degraded).build();
            observer.on_stage_end(STAGE_REFINE, &report);
            summary
        } else {
            extractive
        };

        // Stage 7: Keywords
        let keywords = {
            trace_stage!(STAGE_KEYWORDS);
            observer.on_stage_start(STAGE_KEYWORDS);
            let clock = StageClock::start();
            let top_n = keyword_budget(highlights.len(), document_complexity(&cleaned));
            debug!(top_n, "keyword budget");
            let (keywords, degraded) = self.extract_keywords(&cleaned, top_n, observer);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(keywords.len())
                .degraded(degraded)
                .build();
            observer.on_stage_end(STAGE_KEYWORDS, &report);
            keywords
        };

        // Stage 8: Metrics
        let metrics = {
            trace_stage!(STAGE_METRICS);
            observer.on_stage_start(STAGE_METRICS);
            let clock = StageClock::start();
            let metrics = compute_metrics(&cleaned, &summary, n, selected.len());
            observer.on_stage_end(STAGE_METRICS, &StageReport::new(clock.elapsed()));
            metrics
        };

        SummaryResult {
            summary,
            highlights,
            keywords,
            sentence_scores: scores,
            metrics,
            cleaned_original_text: cleaned,
        }
    }

    /// Sentence vectors, or `None` when no usable embedder is available.
    fn embed(
        &self,
        sentences: &[Sentence],
        observer: &mut impl PipelineObserver,
    ) -> Option<SentenceVectors> {
        let embedder = match self.registry.embedder() {
            Ok(embedder) => embedder,
            Err(e) => {
                debug!(error = %e, "no embedder; lexical scoring only");
                return None;
            }
        };

        let texts: Vec<String> = sentences.iter().map(|s| s.text.clone()).collect();
        let result = embedder
            .encode(&texts)
            .map_err(crate::errors::DigestError::from)
            .and_then(|raw| SentenceVectors::from_embeddings(&raw, sentences.len()));

        match result {
            Ok(vectors) => Some(vectors),
            Err(e) => {
                degrade(observer, DegradationEvent::new("embedding", e.to_string(), "lexical scoring"));
                None
            }
        }
    }

    /// Keywords from the keyphrase capability, else the lexical extractor.
    /// Returns whether a fallback was taken.
    fn extract_keywords(
        &self,
        text: &str,
        top_n: usize,
        observer: &mut impl PipelineObserver,
    ) -> (Vec<Keyword>, bool) {
        let mut degraded = false;

        match self.registry.keyphrases() {
            Ok(extractor) => match self.keywords.extract_with(text, top_n, extractor.as_ref()) {
                Ok(keywords) => return (keywords, false),
                Err(e) => {
                    degrade(observer, DegradationEvent::new("keywords", e.to_string(), "lexical keywords"));
                    degraded = true;
                }
            },
            Err(CapabilityError::Unavailable { .. }) => {
                debug!("no keyphrase extractor; using lexical keywords");
            }
            Err(e) => {
                degrade(observer, DegradationEvent::new("keywords", e.to_string(), "lexical keywords"));
                degraded = true;
            }
        }

        match self.keywords.extract_lexical(text, top_n) {
            Ok(keywords) => (keywords, degraded),
            Err(e) => {
                degrade(observer, DegradationEvent::new("keywords", e.to_string(), "no keywords"));
                (Vec::new(), true)
            }
        }
    }
}
