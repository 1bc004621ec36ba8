//! Error types
//!
//! Summarization itself never fails for the caller: every error below is
//! caught at the smallest scope and replaced by a documented fallback. The
//! only error that crosses the public boundary is [`DigestError::InvalidSettings`].

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, DigestError>;

/// Internal and boundary errors
#[derive(Debug, Error)]
pub enum DigestError {
    /// Every token was a stopword (or there were no tokens at all).
    #[error("empty vocabulary: input contains only stopwords")]
    EmptyVocabulary,

    /// Two vectors that must share a dimensionality did not.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An optional capability failed.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// Request settings could not be parsed.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// Failure reported by an optional model capability
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// No loader was registered, or the loader already failed.
    #[error("capability `{name}` is unavailable")]
    Unavailable { name: String },

    /// The loader ran and failed.
    #[error("capability `{name}` failed to load: {reason}")]
    LoadFailed { name: String, reason: String },

    /// The capability was loaded but the call itself failed.
    #[error("capability `{name}` call failed: {reason}")]
    CallFailed { name: String, reason: String },

    /// The call succeeded but returned something unusable.
    #[error("capability `{name}` returned malformed output: {reason}")]
    MalformedOutput { name: String, reason: String },
}

impl CapabilityError {
    /// Convenience constructor for call failures.
    pub fn call_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CallFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for load failures.
    pub fn load_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for malformed output.
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
