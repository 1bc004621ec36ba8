//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! sentences and scores for debugging, and collecting the fallbacks taken
//! during a request.

use crate::capabilities::DegradationEvent;
use crate::types::{ScoredSentence, Sentence};
use std::time::{Duration, Instant};

pub const STAGE_CLEAN: &str = "clean";
pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_EMBED: &str = "embed";
pub const STAGE_SCORE: &str = "score";
pub const STAGE_SELECT: &str = "select";
pub const STAGE_HIGHLIGHT: &str = "highlight";
pub const STAGE_REFINE: &str = "refine";
pub const STAGE_KEYWORDS: &str = "keywords";
pub const STAGE_METRICS: &str = "metrics";

/// Wall-clock timer for a single stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What happened during one stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    duration: Duration,
    /// Stage-specific output size (sentences, keywords, ...)
    items: Option<usize>,
    /// The stage took a fallback path
    degraded: bool,
}

impl StageReport {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    pub fn items(&self) -> Option<usize> {
        self.items
    }

    pub fn degraded(&self) -> bool {
        self.degraded
    }
}

/// Fluent construction of a [`StageReport`] with optional details.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn items(mut self, items: usize) -> Self {
        self.report.items = Some(items);
        self
    }

    pub fn degraded(mut self, degraded: bool) -> Self {
        self.report.degraded = degraded;
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks invoked by the [`Summarizer`](super::runner::Summarizer).
///
/// Every method has an empty default, so implementors override only what
/// they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Segmented sentences, before scoring
    fn on_sentences(&mut self, _sentences: &[Sentence]) {}

    /// Scores for every sentence, in reading order
    fn on_scores(&mut self, _scores: &[ScoredSentence]) {}

    /// A capability or computation fell back
    fn on_degradation(&mut self, _event: &DegradationEvent) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records per-stage reports and degradations in execution order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    stages: Vec<(&'static str, StageReport)>,
    degradations: Vec<DegradationEvent>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> &[(&'static str, StageReport)] {
        &self.stages
    }

    pub fn report_for(&self, stage: &str) -> Option<&StageReport> {
        self.stages.iter().find(|(s, _)| *s == stage).map(|(_, r)| r)
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|(_, r)| r.duration).sum()
    }

    pub fn degradations(&self) -> &[DegradationEvent] {
        &self.degradations
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.stages.push((stage, report.clone()));
    }

    fn on_degradation(&mut self, event: &DegradationEvent) {
        self.degradations.push(event.clone());
    }
}
