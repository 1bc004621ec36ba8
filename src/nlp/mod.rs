//! Natural Language Processing components
//!
//! Text cleaning, sentence segmentation, tokenization, stopword filtering
//! and TF-IDF vectorization.

pub mod cleaner;
pub mod segmenter;
pub mod stopwords;
pub mod tfidf;
pub mod tokenizer;
