//! Sentence scoring
//!
//! Lexical and semantic feature blending plus domain heuristics.

pub mod domain;
pub mod features;

pub use features::FeatureScorer;
