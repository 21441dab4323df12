use std::fmt;
use std::sync::Arc;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use soul_core::error::{Error, Result};
use soul_core::model::{
    is_soul_key, FeatureVector, Mapping, Namespace, PackageRecord, Resolution, Resolved,
    TopologyMetrics,
};
use soul_core::similarity::{similarity, PERFECT_MATCH_THRESHOLD};
use soul_core::store::{SqliteStore, Store};

use crate::cache::ResolutionCache;
use crate::config::Config;
use crate::convention::NamingConvention;

/// Outcome of a pairwise verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether this verification set the records' verified flags.
    pub verified: bool,

    /// The computed similarity, in [0, 1].
    pub score: f64,

    /// Why the flags were not set, when they were not.
    pub reason: Option<String>,
}

/// Ecosystem-wide counters from one store scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_records: usize,
    pub npm_records: usize,
    pub crate_records: usize,
    pub verified_records: usize,
    pub indexed_souls: usize,
    pub paired_records: usize,
    pub average_pairing_score: f64,
}

/// The package-facing API: lookup, alternative discovery, verification,
/// registration, and purge over an injected store.
///
/// Construct one instance per process or test and pass the store
/// explicitly; there is no global registry.
pub struct ResolutionService {
    store: Arc<dyn Store>,
    convention: NamingConvention,
    cache: ResolutionCache,
    dimension: usize,
}

impl fmt::Debug for ResolutionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionService")
            .field("convention", &self.convention)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl ResolutionService {
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        convention: NamingConvention,
        dimension: usize,
        cache_capacity: usize,
    ) -> Self {
        Self {
            store,
            convention,
            cache: ResolutionCache::new(cache_capacity),
            dimension,
        }
    }

    /// Opens the configured SQLite store and wires a service around it.
    pub fn open(config: &Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = SqliteStore::open(&config.database_path)?;
        Ok(Self::new(
            Arc::new(store),
            NamingConvention::new(&config.soul_suffix),
            config.dimension,
            config.cache_capacity,
        ))
    }

    /// Feature vector length this registry is configured for.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// Resolves `name` to its best-known counterpart pairing.
    ///
    /// Probes the store in convention order (exact npm, exact crate, then
    /// the suffix translation) and pairs the first hit with the
    /// best-scoring counterpart on the far side. A missing package is a
    /// [`Resolution::NotFound`] value, never an error.
    pub fn resolve(&self, name: &str) -> Result<Resolution> {
        if let Some(hit) = self.cache.get(name) {
            debug!("resolve cache hit for {name}");
            return Ok(hit);
        }

        let resolution = self.resolve_uncached(name)?;
        self.cache.put(name, &resolution);
        Ok(resolution)
    }

    fn resolve_uncached(&self, name: &str) -> Result<Resolution> {
        let Some(record) = self.lookup(name)? else {
            debug!("no record for {name} in any namespace");
            return Ok(Resolution::NotFound {
                name: name.to_string(),
            });
        };

        let mapping = self.best_counterpart(&record)?;
        Ok(Resolution::Found(Resolved { record, mapping }))
    }

    /// First record matching the convention's probe order for `name`.
    fn lookup(&self, name: &str) -> Result<Option<PackageRecord>> {
        for key in self.convention.candidate_keys(name) {
            if let Some(record) = self.store.get(&key)? {
                debug!("resolved {name} via {key}");
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Best-scoring counterpart for `record` on the far side of the
    /// convention, if any candidate exists.
    ///
    /// Permissive: a candidate whose vector length disagrees is an
    /// extractor/store inconsistency, logged and skipped rather than
    /// failing the whole lookup.
    fn best_counterpart(&self, record: &PackageRecord) -> Result<Option<Mapping>> {
        let mut best: Option<Mapping> = None;

        for key in self
            .convention
            .counterpart_keys(record.namespace, &record.name)
        {
            let Some(candidate) = self.store.get(&key)? else {
                continue;
            };
            let score = match similarity(record, &candidate) {
                Ok(score) => score,
                Err(err) if err.is_dimension_mismatch() => {
                    error!("skipping counterpart {key} for {}: {err}", record.key());
                    continue;
                }
                Err(err) => return Err(err),
            };

            let improves = best.as_ref().map_or(true, |current| score > current.score);
            if improves {
                best = Some(Mapping {
                    counterpart: candidate,
                    score,
                });
            }
        }

        Ok(best)
    }

    /// All stored packages scoring at least `threshold` against `name`,
    /// sorted descending by score.
    ///
    /// The queried record itself and `soul:` index keys are excluded.
    /// Cost is one O(N) store scan per call, acceptable at registry scale
    /// (thousands of records, not millions). Candidates with mismatched
    /// vectors are logged and skipped, matching the resolve policy.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when `name` has no record: with nothing to
    /// compare against, an empty list would mask a typo.
    pub fn find_alternatives(&self, name: &str, threshold: f64) -> Result<Vec<Mapping>> {
        let subject = self.lookup(name)?.ok_or_else(|| Error::NotFound {
            entity: "package",
            key: name.to_string(),
        })?;
        let subject_key = subject.key();

        let mut alternatives = Vec::new();
        for (key, candidate) in self.store.iterate()? {
            if is_soul_key(&key) || key == subject_key {
                continue;
            }
            match similarity(&subject, &candidate) {
                Ok(score) if score >= threshold => {
                    alternatives.push(Mapping {
                        counterpart: candidate,
                        score,
                    });
                }
                Ok(_) => {}
                Err(err) if err.is_dimension_mismatch() => {
                    error!("skipping candidate {key} for {name}: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        alternatives.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(alternatives)
    }

    /// Verifies the cross-registry pairing between two named packages.
    ///
    /// Both sides must resolve; the comparison is strict, so a dimension
    /// mismatch propagates instead of degrading to a zero score. When the
    /// score strictly exceeds the perfect-match threshold, both records
    /// and their `soul:` index copies are marked verified. The flag is
    /// one-way: a failing re-verification reports the low score but never
    /// clears a previously set flag.
    ///
    /// The two record updates are separate puts, not a transaction;
    /// concurrent writers race and the last write wins. Accepted for this
    /// non-critical metadata flag.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] naming the missing side when either package
    /// has no record; [`Error::DimensionMismatch`] when the vectors
    /// disagree in length.
    pub fn verify(&self, name_a: &str, name_b: &str) -> Result<VerificationResult> {
        let a = self.lookup(name_a)?.ok_or_else(|| Error::NotFound {
            entity: "package",
            key: name_a.to_string(),
        })?;
        let b = self.lookup(name_b)?.ok_or_else(|| Error::NotFound {
            entity: "package",
            key: name_b.to_string(),
        })?;

        let score = similarity(&a, &b).map_err(|err| {
            error!("verification of {name_a} <-> {name_b} failed: {err}");
            err
        })?;

        if score > PERFECT_MATCH_THRESHOLD {
            self.mark_verified(a)?;
            self.mark_verified(b)?;
            self.cache.clear();
            info!("verified pairing {name_a} <-> {name_b} at {score:.4}");
            return Ok(VerificationResult {
                verified: true,
                score,
                reason: None,
            });
        }

        debug!("pairing {name_a} <-> {name_b} scored {score:.4}, not verified");
        Ok(VerificationResult {
            verified: false,
            score,
            reason: Some(format!(
                "score {score:.4} does not exceed perfect-match threshold {PERFECT_MATCH_THRESHOLD}"
            )),
        })
    }

    /// Sets the one-way verified flag on a record's namespace key and its
    /// `soul:` index copy. Never clears.
    fn mark_verified(&self, mut record: PackageRecord) -> Result<()> {
        if record.verified {
            return Ok(());
        }
        record.verified = true;
        self.store.put(&record.key(), &record)?;
        self.store.put(&record.soul_key(), &record)?;
        Ok(())
    }

    /// Registers a package from pre-extracted features.
    ///
    /// Strict at this boundary: the vector must match the configured
    /// dimension. Re-registering the same name and version is rejected;
    /// a new version replaces the record wholesale with a fresh
    /// `created_at` and the verified flag reset, since changed features
    /// void any earlier verification. Both the namespace key and the
    /// `soul:` content-index key are written.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] for a wrong-length vector;
    /// [`Error::AlreadyExists`] for a same-version re-registration.
    pub fn register(
        &self,
        name: &str,
        namespace: Namespace,
        version: &str,
        features: FeatureVector,
        topology: TopologyMetrics,
    ) -> Result<PackageRecord> {
        if features.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: features.len(),
            });
        }

        let key = namespace.key_for(name);
        if let Some(existing) = self.store.get(&key)? {
            if existing.version == version {
                return Err(Error::AlreadyExists {
                    key,
                    version: version.to_string(),
                });
            }
            // The old version's content hash may differ; drop its index
            // entry so the soul index never holds orphans.
            self.store.delete(&existing.soul_key())?;
            info!(
                "replacing {key} {} with {version}",
                existing.version
            );
        }

        let record = PackageRecord::new(name, namespace, version, features, topology);
        self.store.put(&key, &record)?;
        self.store.put(&record.soul_key(), &record)?;
        self.cache.clear();
        info!("registered {key} at {version}");
        Ok(record)
    }

    /// Administrative removal of a record and its content-index entry.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no record exists under the namespace key.
    pub fn purge(&self, name: &str, namespace: Namespace) -> Result<()> {
        let key = namespace.key_for(name);
        let Some(record) = self.store.get(&key)? else {
            return Err(Error::NotFound {
                entity: "package",
                key,
            });
        };

        self.store.delete(&key)?;
        self.store.delete(&record.soul_key())?;
        self.cache.clear();
        info!("purged {key}");
        Ok(())
    }

    /// Ecosystem-wide counters from one O(N) store scan.
    ///
    /// A record counts as paired when a convention counterpart with a
    /// comparable vector exists; `average_pairing_score` is the mean over
    /// those pairings, 0.0 when there are none.
    pub fn stats(&self) -> Result<RegistryStats> {
        let mut stats = RegistryStats::default();
        let mut score_sum = 0.0;

        for (key, record) in self.store.iterate()? {
            if is_soul_key(&key) {
                stats.indexed_souls += 1;
                continue;
            }

            stats.total_records += 1;
            match record.namespace {
                Namespace::Npm => stats.npm_records += 1,
                Namespace::Crate => stats.crate_records += 1,
            }
            if record.verified {
                stats.verified_records += 1;
            }
            if let Some(mapping) = self.best_counterpart(&record)? {
                stats.paired_records += 1;
                score_sum += mapping.score;
            }
        }

        if stats.paired_records > 0 {
            stats.average_pairing_score = score_sum / stats.paired_records as f64;
        }
        Ok(stats)
    }
}
