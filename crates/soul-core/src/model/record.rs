use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::namespace::Namespace;
use crate::model::topology::TopologyMetrics;
use crate::model::vector::FeatureVector;

/// Prefix for content-hash index keys.
pub const SOUL_KEY_PREFIX: &str = "soul:";

/// A registered package: identity, version, and extracted features.
///
/// Records are immutable once stored except for the `verified` flag, which
/// only a successful verification may set. Changing a package's features
/// means registering a new version, which replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub namespace: Namespace,

    /// Semantic version string, stored verbatim.
    pub version: String,

    /// Fixed-length feature vector from the external extractor.
    pub features: FeatureVector,

    /// Secondary structural metrics from the external extractor.
    pub topology: TopologyMetrics,

    /// One-way flag: set when a verification scores above the perfect-match
    /// threshold, never cleared afterwards.
    pub verified: bool,

    /// Set once at registration; a re-registered version gets a fresh value.
    pub created_at: DateTime<Utc>,
}

impl PackageRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: Namespace,
        version: impl Into<String>,
        features: FeatureVector,
        topology: TopologyMetrics,
    ) -> Self {
        Self {
            name: name.into(),
            namespace,
            version: version.into(),
            features,
            topology,
            verified: false,
            created_at: Utc::now(),
        }
    }

    /// The record's primary store key, e.g. `npm:left-pad`.
    #[must_use]
    pub fn key(&self) -> String {
        self.namespace.key_for(&self.name)
    }

    /// The record's content-index key, e.g. `soul:3a7bd3…`.
    #[must_use]
    pub fn soul_key(&self) -> String {
        format!("{SOUL_KEY_PREFIX}{}", self.features.phash())
    }
}

/// Returns `true` for keys under the content-hash index rather than a
/// registry namespace. Scans over registry records skip these to avoid
/// counting the same package twice.
#[must_use]
pub fn is_soul_key(key: &str) -> bool {
    key.starts_with(SOUL_KEY_PREFIX)
}
