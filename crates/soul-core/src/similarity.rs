//! Similarity scoring between package records.
//!
//! The score is pure and symmetric: no I/O, no ordering sensitivity, and
//! bounded to [0, 1]. Inverse Euclidean distance rewards proximity in
//! feature space without requiring normalization; multiplying by a topology
//! agreement term keeps two structurally dissimilar packages that happen to
//! sit close in raw distance from scoring as near-identical.

use crate::error::Result;
use crate::model::{PackageRecord, TopologyMetrics};

/// Pairings scoring below this are parasitic: nominally paired but not
/// meaningfully similar.
pub const PARASITIC_THRESHOLD: f64 = 0.3;

/// Default cutoff for alternative discovery.
pub const DEFAULT_ALTERNATIVE_THRESHOLD: f64 = 0.8;

/// Scores strictly above this mark a perfect cross-registry match, the
/// only scores permitted to set a record's `verified` flag.
pub const PERFECT_MATCH_THRESHOLD: f64 = 0.95;

/// Divisor normalizing Euler characteristic differences into [0, 1].
const EULER_SCALE: f64 = 100.0;

/// Similarity between two records, in [0, 1].
///
/// Combines inverse vector distance with topology agreement:
///
/// ```text
/// score = clamp((1 / (1 + d)) * t, 0, 1)
/// ```
///
/// where `d` is the Euclidean distance between the feature vectors and `t`
/// is [`topology_similarity`]. The score is 1.0 exactly when both the
/// vectors and the topology metrics are identical.
///
/// # Errors
///
/// Returns [`Error`](crate::Error::DimensionMismatch) when the feature
/// vectors differ in length. Callers decide per call site whether to
/// propagate (strict) or skip the comparison (permissive); the mismatch is
/// never coerced to a zero score here.
pub fn similarity(a: &PackageRecord, b: &PackageRecord) -> Result<f64> {
    let d = a.features.distance(&b.features)?;
    let t = topology_similarity(&a.topology, &b.topology);
    Ok(((1.0 / (1.0 + d)) * t).clamp(0.0, 1.0))
}

/// Agreement between two topology metric sets, in [0, 1].
///
/// Average of three per-metric terms, each clamped to [0, 1] before
/// averaging so one wildly divergent metric cannot drag the term negative.
#[must_use]
pub fn topology_similarity(a: &TopologyMetrics, b: &TopologyMetrics) -> f64 {
    let euler_a = a.euler_characteristic as f64;
    let euler_b = b.euler_characteristic as f64;

    let euler = 1.0 - (euler_a - euler_b).abs() / EULER_SCALE;
    let clustering = 1.0 - (a.clustering - b.clustering).abs();
    let modularity = 1.0 - (a.modularity - b.modularity).abs();

    (euler.clamp(0.0, 1.0) + clustering.clamp(0.0, 1.0) + modularity.clamp(0.0, 1.0)) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureVector, Namespace};

    fn record(name: &str, values: Vec<f64>, topology: TopologyMetrics) -> PackageRecord {
        PackageRecord::new(
            name,
            Namespace::Npm,
            "1.0.0",
            FeatureVector::new(values),
            topology,
        )
    }

    #[test]
    fn test_identity_scores_one() {
        let a = record(
            "a",
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            TopologyMetrics::new(4, 0.5, 0.3),
        );
        assert_eq!(similarity(&a, &a).unwrap(), 1.0);
    }

    #[test]
    fn test_identical_records_score_one() {
        let topology = TopologyMetrics::new(2, 0.4, 0.6);
        let a = record("a", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], topology);
        let b = record("b", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], topology);
        assert_eq!(similarity(&a, &b).unwrap(), 1.0);
    }

    #[test]
    fn test_symmetry() {
        let a = record(
            "a",
            vec![1.0, 2.0, 3.0],
            TopologyMetrics::new(3, 0.2, 0.8),
        );
        let b = record(
            "b",
            vec![2.5, 1.0, 4.0],
            TopologyMetrics::new(7, 0.9, 0.1),
        );
        assert_eq!(
            similarity(&a, &b).unwrap(),
            similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_bounded() {
        let pairs = [
            (vec![0.0, 0.0], vec![1000.0, -1000.0]),
            (vec![1.0, 1.0], vec![1.0, 1.0]),
            (vec![-5.0, 3.0], vec![5.0, -3.0]),
        ];
        for (va, vb) in pairs {
            let a = record("a", va, TopologyMetrics::new(-500, 10.0, -10.0));
            let b = record("b", vb, TopologyMetrics::new(500, -10.0, 10.0));
            let score = similarity(&a, &b).unwrap();
            assert!((0.0..=1.0).contains(&score), "score {score} out of bounds");
        }
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let a = record("a", vec![1.0; 7], TopologyMetrics::default());
        let b = record("b", vec![1.0; 5], TopologyMetrics::default());
        assert!(similarity(&a, &b).unwrap_err().is_dimension_mismatch());
    }

    #[test]
    fn test_topology_disagreement_lowers_score() {
        let near = record("a", vec![1.0, 2.0], TopologyMetrics::new(0, 0.0, 0.0));
        let same_vector = record("b", vec![1.0, 2.0], TopologyMetrics::new(0, 0.0, 0.0));
        let divergent = record("c", vec![1.0, 2.0], TopologyMetrics::new(200, 1.0, 1.0));

        let aligned = similarity(&near, &same_vector).unwrap();
        let skewed = similarity(&near, &divergent).unwrap();
        assert_eq!(aligned, 1.0);
        assert!(skewed < aligned);
    }

    #[test]
    fn test_topology_terms_clamp_before_averaging() {
        // Euler difference of 300 would contribute -2.0 unclamped; the
        // clamped term contributes 0.0, leaving the other two at 1.0 each.
        let a = TopologyMetrics::new(0, 0.5, 0.5);
        let b = TopologyMetrics::new(300, 0.5, 0.5);
        let t = topology_similarity(&a, &b);
        assert!((t - 2.0 / 3.0).abs() < 1e-12);
    }
}
