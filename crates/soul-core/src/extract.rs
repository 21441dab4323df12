//! Feature-extractor contract.
//!
//! How a feature vector is computed from package source is outside this
//! registry: the extractor is an opaque collaborator that turns raw source
//! into a fixed-length vector plus topology metrics. The registry only
//! requires that one extractor feeds one registry, so every stored vector
//! shares the configured dimension.

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::model::{FeatureVector, TopologyMetrics};

/// Output of a feature extraction: the opaque numbers the registry stores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFeatures {
    pub features: FeatureVector,
    pub topology: TopologyMetrics,
}

/// External collaborator producing feature vectors from package source.
pub trait FeatureExtractor: Send + Sync {
    /// Fixed length of every vector this extractor produces.
    fn dimension(&self) -> usize;

    /// Extracts a feature vector and topology metrics from raw source.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be featurized.
    fn extract(&self, source: &str) -> Result<ExtractedFeatures>;
}

/// Deterministic extractor deriving features from a content hash.
///
/// Stands in for a real structural extractor in tests and demos: the same
/// source always yields the same vector, different sources almost always
/// differ, and no parsing is involved.
#[derive(Debug, Clone)]
pub struct MockFeatureExtractor {
    dimension: usize,
}

impl MockFeatureExtractor {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl FeatureExtractor for MockFeatureExtractor {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn extract(&self, source: &str) -> Result<ExtractedFeatures> {
        let digest = Sha256::digest(source.as_bytes());

        let values = (0..self.dimension)
            .map(|i| f64::from(digest[i % digest.len()]) / 255.0 * 10.0)
            .collect();
        let topology = TopologyMetrics::new(
            i64::from(digest[0] % 16),
            f64::from(digest[1]) / 255.0,
            f64::from(digest[2]) / 255.0,
        );

        Ok(ExtractedFeatures {
            features: FeatureVector::new(values),
            topology,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_is_deterministic() {
        let extractor = MockFeatureExtractor::new(7);
        let a = extractor.extract("function leftPad(str, len) {}").unwrap();
        let b = extractor.extract("function leftPad(str, len) {}").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.features.len(), 7);
    }

    #[test]
    fn test_mock_distinguishes_sources() {
        let extractor = MockFeatureExtractor::new(7);
        let a = extractor.extract("fn left_pad() {}").unwrap();
        let b = extractor.extract("fn right_pad() {}").unwrap();

        assert_ne!(a.features, b.features);
    }

    #[test]
    fn test_mock_honors_dimension() {
        for dimension in [1, 7, 64] {
            let extractor = MockFeatureExtractor::new(dimension);
            let extracted = extractor.extract("source").unwrap();
            assert_eq!(extracted.features.len(), dimension);
        }
    }
}
