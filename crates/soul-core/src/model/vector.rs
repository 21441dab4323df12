use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Fixed-length numeric feature vector summarizing a package's structure.
///
/// The vector is opaque to the registry: an external feature extractor
/// produces it and the similarity engine consumes it. All records in one
/// registry share a single vector length fixed at configuration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean distance to another vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when the vectors differ in
    /// length; distance between mismatched vectors is undefined and must
    /// never degrade to a silent zero.
    pub fn distance(&self, other: &Self) -> Result<f64> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        let sum: f64 = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        Ok(sum.sqrt())
    }

    /// Content hash of the vector: lowercase hex SHA-256 over the
    /// components' little-endian bytes, in order.
    ///
    /// Two vectors hash identically exactly when their components are
    /// bitwise identical, which makes the hash usable as the `soul:`
    /// content-index key.
    #[must_use]
    pub fn phash(&self) -> String {
        let mut hasher = Sha256::new();
        for value in &self.0 {
            hasher.update(value.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_identical() {
        let a = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let b = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.distance(&b).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_euclidean() {
        let a = FeatureVector::new(vec![0.0, 0.0]);
        let b = FeatureVector::new(vec![3.0, 4.0]);
        assert_eq!(a.distance(&b).unwrap(), 5.0);
    }

    #[test]
    fn test_distance_rejects_mismatched_lengths() {
        let a = FeatureVector::new(vec![1.0; 7]);
        let b = FeatureVector::new(vec![1.0; 5]);
        let err = a.distance(&b).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 7,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_phash_is_stable_and_content_sensitive() {
        let a = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let b = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let c = FeatureVector::new(vec![1.0, 2.0, 3.5]);

        assert_eq!(a.phash(), b.phash());
        assert_ne!(a.phash(), c.phash());
        assert_eq!(a.phash().len(), 64);
    }
}
