//! Keyword extraction and budgeting

pub mod budget;
pub mod extractor;

pub use budget::{document_complexity, keyword_budget};
pub use extractor::KeywordExtractor;
