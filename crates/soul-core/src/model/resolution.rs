use serde::{Deserialize, Serialize};

use crate::model::record::PackageRecord;

/// A scored association between a resolved record and its best-known
/// counterpart on the other side of the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    pub counterpart: PackageRecord,

    /// Similarity between the record and the counterpart, in [0, 1].
    pub score: f64,
}

/// A successfully resolved package with its optional counterpart pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolved {
    pub record: PackageRecord,
    pub mapping: Option<Mapping>,
}

/// Outcome of a resolve lookup.
///
/// A missing package is a value, not an error: callers are forced to
/// handle both arms instead of treating absence as an exceptional path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Found(Resolved),
    NotFound { name: String },
}

impl Resolution {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Pairing score, when the resolution carries a scored counterpart.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Found(resolved) => resolved.mapping.as_ref().map(|m| m.score),
            Self::NotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureVector, Namespace, TopologyMetrics};

    fn resolved(score: Option<f64>) -> Resolution {
        let record = PackageRecord::new(
            "left-pad",
            Namespace::Npm,
            "1.3.0",
            FeatureVector::new(vec![1.0, 2.0]),
            TopologyMetrics::default(),
        );
        let mapping = score.map(|score| Mapping {
            counterpart: PackageRecord::new(
                "left-pad-soul",
                Namespace::Crate,
                "1.0.0",
                FeatureVector::new(vec![1.0, 2.0]),
                TopologyMetrics::default(),
            ),
            score,
        });
        Resolution::Found(Resolved { record, mapping })
    }

    #[test]
    fn test_score_present_only_with_mapping() {
        assert_eq!(resolved(Some(0.9)).score(), Some(0.9));
        assert_eq!(resolved(None).score(), None);
        let missing = Resolution::NotFound {
            name: "ghost".to_string(),
        };
        assert_eq!(missing.score(), None);
        assert!(!missing.is_found());
    }

    #[test]
    fn test_serde_tags_both_arms() {
        let found = serde_json::to_value(resolved(Some(1.0))).unwrap();
        assert_eq!(found["status"], "found");

        let missing = serde_json::to_value(Resolution::NotFound {
            name: "ghost".to_string(),
        })
        .unwrap();
        assert_eq!(missing["status"], "not_found");
        assert_eq!(missing["name"], "ghost");
    }
}
