//! Capability registry
//!
//! Owns one [`LazyCapability`] slot per optional capability. Build it once
//! at process start and share it by reference (or `Arc`) with every
//! request.

use super::lazy::{CapabilityStatus, LazyCapability};
use super::{AbstractiveGenerator, CapabilityResult, Embedder, KeyphraseExtractor};
use serde::Serialize;
use std::sync::Arc;

pub const EMBEDDER: &str = "embedder";
pub const GENERATOR: &str = "abstractive_generator";
pub const KEYPHRASES: &str = "keyphrase_extractor";

/// Status snapshot of every capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityReport {
    pub embedder: CapabilityStatus,
    pub generator: CapabilityStatus,
    pub keyphrases: CapabilityStatus,
}

/// The set of optional capabilities available to the pipeline
#[derive(Debug)]
pub struct CapabilityRegistry {
    embedder: LazyCapability<dyn Embedder>,
    generator: LazyCapability<dyn AbstractiveGenerator>,
    keyphrases: LazyCapability<dyn KeyphraseExtractor>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl CapabilityRegistry {
    /// No capabilities: every stage uses its lexical fallback.
    pub fn empty() -> Self {
        Self {
            embedder: LazyCapability::absent(EMBEDDER),
            generator: LazyCapability::absent(GENERATOR),
            keyphrases: LazyCapability::absent(KEYPHRASES),
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = LazyCapability::ready(EMBEDDER, embedder);
        self
    }

    /// Register an embedder that is constructed on first use
    pub fn with_embedder_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> CapabilityResult<Arc<dyn Embedder>> + Send + Sync + 'static,
    {
        self.embedder = LazyCapability::lazy(EMBEDDER, loader);
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn AbstractiveGenerator>) -> Self {
        self.generator = LazyCapability::ready(GENERATOR, generator);
        self
    }

    pub fn with_generator_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> CapabilityResult<Arc<dyn AbstractiveGenerator>> + Send + Sync + 'static,
    {
        self.generator = LazyCapability::lazy(GENERATOR, loader);
        self
    }

    pub fn with_keyphrases(mut self, extractor: Arc<dyn KeyphraseExtractor>) -> Self {
        self.keyphrases = LazyCapability::ready(KEYPHRASES, extractor);
        self
    }

    pub fn with_keyphrases_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> CapabilityResult<Arc<dyn KeyphraseExtractor>> + Send + Sync + 'static,
    {
        self.keyphrases = LazyCapability::lazy(KEYPHRASES, loader);
        self
    }

    pub fn embedder(&self) -> CapabilityResult<Arc<dyn Embedder>> {
        self.embedder.try_get()
    }

    pub fn generator(&self) -> CapabilityResult<Arc<dyn AbstractiveGenerator>> {
        self.generator.try_get()
    }

    pub fn keyphrases(&self) -> CapabilityResult<Arc<dyn KeyphraseExtractor>> {
        self.keyphrases.try_get()
    }

    /// Current status of each slot, without triggering any load
    pub fn report(&self) -> CapabilityReport {
        CapabilityReport {
            embedder: self.embedder.status(),
            generator: self.generator.status(),
            keyphrases: self.keyphrases.status(),
        }
    }

    /// Load every pending capability now instead of on first request.
    pub fn warm_up(&self) -> CapabilityReport {
        let _ = self.embedder.get();
        let _ = self.generator.get();
        let _ = self.keyphrases.get();
        self.report()
    }
}
