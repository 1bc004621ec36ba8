//! Unit vector representation for sentences
//!
//! Wraps the dense embeddings returned by an
//! [`Embedder`](crate::capabilities::Embedder) as L2-normalized vectors, so
//! cosine similarity reduces to a dot product.

use crate::errors::{DigestError, Result};

/// A dense unit vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitVector {
    /// Normalized components (all zero for a zero input)
    values: Vec<f64>,
    /// L2 norm of the vector before normalization
    norm: f64,
}

impl UnitVector {
    /// Create a new empty unit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw embedding components
    pub fn from_values(raw: &[f32]) -> Self {
        let mut values: Vec<f64> = raw.iter().map(|&v| v as f64).collect();
        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in values.iter_mut() {
                *value /= norm;
            }
        }
        Self { values, norm }
    }

    /// Cosine similarity with another vector (0 when either is zero)
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// True for the zero vector
    pub fn is_empty(&self) -> bool {
        self.norm == 0.0
    }
}

/// Normalized embeddings for every sentence of a document, plus the
/// document centroid
#[derive(Debug, Clone)]
pub struct SentenceVectors {
    vectors: Vec<UnitVector>,
    centroid: UnitVector,
}

impl SentenceVectors {
    /// Validate raw embeddings against the sentence count.
    ///
    /// Every vector must share the same dimensionality and there must be
    /// exactly one per sentence.
    pub fn from_embeddings(embeddings: &[Vec<f32>], expected: usize) -> Result<Self> {
        if embeddings.len() != expected {
            return Err(DigestError::DimensionMismatch {
                expected,
                actual: embeddings.len(),
            });
        }

        let dims = embeddings.first().map_or(0, Vec::len);
        if let Some(bad) = embeddings.iter().find(|e| e.len() != dims) {
            return Err(DigestError::DimensionMismatch {
                expected: dims,
                actual: bad.len(),
            });
        }

        // Mean of the raw vectors; normalizing it does not change cosine.
        let mut mean = vec![0.0f32; dims];
        for embedding in embeddings {
            for (m, v) in mean.iter_mut().zip(embedding) {
                *m += v;
            }
        }
        if !embeddings.is_empty() {
            let n = embeddings.len() as f32;
            mean.iter_mut().for_each(|m| *m /= n);
        }

        Ok(Self {
            vectors: embeddings.iter().map(|e| UnitVector::from_values(e)).collect(),
            centroid: UnitVector::from_values(&mean),
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&UnitVector> {
        self.vectors.get(i)
    }

    pub fn centroid(&self) -> &UnitVector {
        &self.centroid
    }

    /// Cosine similarity between sentences `i` and `j`
    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        match (self.vectors.get(i), self.vectors.get(j)) {
            (Some(a), Some(b)) => a.cosine_similarity(b),
            _ => 0.0,
        }
    }

    /// Similarity of sentence `i` to the centroid, floored at 0
    pub fn centrality(&self, i: usize) -> f64 {
        self.vectors
            .get(i)
            .map_or(0.0, |v| v.cosine_similarity(&self.centroid).max(0.0))
    }
}
