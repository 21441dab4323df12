use serde::{Deserialize, Serialize};

/// Secondary structural metrics carried alongside a feature vector.
///
/// These act as a tiebreaker signal in similarity scoring: two packages
/// whose feature vectors happen to sit close in raw distance still score
/// low when their structure graphs disagree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TopologyMetrics {
    /// Euler characteristic of the package's structure graph.
    pub euler_characteristic: i64,

    /// Average clustering coefficient.
    pub clustering: f64,

    /// Community modularity score.
    pub modularity: f64,
}

impl TopologyMetrics {
    #[must_use]
    pub fn new(euler_characteristic: i64, clustering: f64, modularity: f64) -> Self {
        Self {
            euler_characteristic,
            clustering,
            modularity,
        }
    }
}
