//! Batch recommendation classification.
//!
//! Sorts a dependency list into four disjoint buckets: `replace` for
//! parasitic pairings, `upgrade` for mid-band pairings with a strictly
//! better alternative, `transmute` for packages with no pairing yet, and
//! `perfect` for pairings at or above the perfect-match threshold. Names
//! that fit no bucket are omitted rather than reported.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use soul_core::error::Result;
use soul_core::model::{Mapping, Namespace};
use soul_core::similarity::{
    DEFAULT_ALTERNATIVE_THRESHOLD, PARASITIC_THRESHOLD, PERFECT_MATCH_THRESHOLD,
};

use crate::service::ResolutionService;

/// Cap on replacement candidates carried per entry.
const MAX_REPLACE_CANDIDATES: usize = 3;

/// Scan threshold when hunting replacements for a parasitic pairing.
const REPLACE_SCAN_THRESHOLD: f64 = 0.5;

/// A candidate package in a recommendation, slimmed down to what the
/// report needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub namespace: Namespace,
    pub score: f64,
}

impl From<&Mapping> for Candidate {
    fn from(mapping: &Mapping) -> Self {
        Self {
            name: mapping.counterpart.name.clone(),
            namespace: mapping.counterpart.namespace,
            score: mapping.score,
        }
    }
}

/// A parasitic pairing with up to three replacement candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceAdvice {
    pub name: String,
    pub score: f64,
    pub candidates: Vec<Candidate>,
}

/// A mid-band pairing with a strictly better alternative available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeAdvice {
    pub name: String,
    pub score: f64,
    pub best: Candidate,
}

/// Classification of a dependency list into disjoint buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Parasitic pairings (score below 0.3) with replacement candidates.
    pub replace: Vec<ReplaceAdvice>,

    /// Mid-band pairings (0.3 to 0.8) where something strictly better
    /// exists.
    pub upgrade: Vec<UpgradeAdvice>,

    /// Packages with no counterpart pairing yet.
    pub transmute: Vec<String>,

    /// Pairings at or above the perfect-match threshold.
    pub perfect: Vec<String>,
}

impl RecommendationReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replace.is_empty()
            && self.upgrade.is_empty()
            && self.transmute.is_empty()
            && self.perfect.is_empty()
    }
}

impl ResolutionService {
    /// Classifies each name into at most one recommendation bucket.
    ///
    /// A failure local to one name (an unresolvable entry, a mismatched
    /// vector) skips that name with a warning; only a store failure
    /// aborts the whole batch.
    pub fn recommend(&self, names: &[String]) -> Result<RecommendationReport> {
        let mut report = RecommendationReport::default();

        for name in names {
            match self.classify(name, &mut report) {
                Ok(()) => {}
                Err(err) if err.is_store_failure() => return Err(err),
                Err(err) => warn!("skipping {name} in recommendation batch: {err}"),
            }
        }

        Ok(report)
    }

    fn classify(&self, name: &str, report: &mut RecommendationReport) -> Result<()> {
        let resolution = self.resolve(name)?;
        let Some(score) = resolution.score() else {
            // Exists on one side only, or not at all: a candidate for
            // transmutation into the other registry.
            debug!("{name}: no pairing, transmute");
            report.transmute.push(name.to_string());
            return Ok(());
        };

        if score < PARASITIC_THRESHOLD {
            let candidates = self
                .find_alternatives(name, REPLACE_SCAN_THRESHOLD)?
                .iter()
                .take(MAX_REPLACE_CANDIDATES)
                .map(Candidate::from)
                .collect();
            report.replace.push(ReplaceAdvice {
                name: name.to_string(),
                score,
                candidates,
            });
        } else if score < DEFAULT_ALTERNATIVE_THRESHOLD {
            let best = self
                .find_alternatives(name, DEFAULT_ALTERNATIVE_THRESHOLD)?
                .into_iter()
                .find(|alternative| alternative.score > score);
            if let Some(best) = best {
                report.upgrade.push(UpgradeAdvice {
                    name: name.to_string(),
                    score,
                    best: Candidate::from(&best),
                });
            }
        } else if score >= PERFECT_MATCH_THRESHOLD {
            report.perfect.push(name.to_string());
        }
        // Scores in [0.8, 0.95) are healthy but not perfect: no bucket.

        Ok(())
    }
}
