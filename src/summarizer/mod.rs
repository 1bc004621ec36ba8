//! Summarization components
//!
//! Extractive selection using MMR (Maximal Marginal Relevance), adaptive
//! highlight thresholding, and optional abstractive refinement.

pub mod highlights;
pub mod refiner;
pub mod selector;
pub mod unit_vector;

pub use highlights::HighlightSelector;
pub use refiner::AbstractiveRefiner;
pub use selector::DiversitySelector;
