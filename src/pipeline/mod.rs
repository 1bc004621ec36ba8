//! Summarization pipeline
//!
//! Request settings and their validation, the stage runner with its observer
//! hooks, summary metrics, and batch processing.

pub mod batch;
pub mod metrics;
pub mod observer;
pub mod runner;
pub mod settings;
pub mod validation;

pub use batch::{summarize_batch, BatchDocument, BatchResult, BatchSettings};
pub use observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use runner::Summarizer;
pub use settings::{RequestSettings, SummaryMode};
pub use validation::{SettingsValidator, ValidationReport};
