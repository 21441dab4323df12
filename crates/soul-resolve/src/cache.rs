use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use soul_core::model::Resolution;

/// Read-through cache for resolve lookups.
///
/// Bounded LRU so a stream of distinct names cannot grow it without
/// limit. Only found resolutions are cached: a NotFound can become Found
/// the moment a record registers, and callers probing unknown names are
/// exactly the ones a stale negative entry would mislead.
#[derive(Debug)]
pub struct ResolutionCache {
    entries: Mutex<LruCache<String, Resolution>>,
}

impl ResolutionCache {
    /// A cache holding at most `capacity` resolutions; a zero capacity
    /// is bumped to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached resolution for `name`, refreshing its recency.
    ///
    /// A poisoned lock reads as a miss.
    pub fn get(&self, name: &str) -> Option<Resolution> {
        self.entries.lock().ok()?.get(name).cloned()
    }

    /// Caches a found resolution; NotFound outcomes are not cached.
    pub fn put(&self, name: &str, resolution: &Resolution) {
        if !resolution.is_found() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(name.to_string(), resolution.clone());
        }
    }

    /// Drops every entry. Called after any store mutation, since a
    /// register, verify, or purge can change arbitrary cached pairings.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soul_core::model::{
        FeatureVector, Namespace, PackageRecord, Resolved, TopologyMetrics,
    };

    fn found(name: &str) -> Resolution {
        Resolution::Found(Resolved {
            record: PackageRecord::new(
                name,
                Namespace::Npm,
                "1.0.0",
                FeatureVector::new(vec![1.0]),
                TopologyMetrics::default(),
            ),
            mapping: None,
        })
    }

    #[test]
    fn test_round_trip() {
        let cache = ResolutionCache::new(4);
        let resolution = found("left-pad");

        assert!(cache.get("left-pad").is_none());
        cache.put("left-pad", &resolution);
        assert_eq!(cache.get("left-pad"), Some(resolution));
    }

    #[test]
    fn test_not_found_is_never_cached() {
        let cache = ResolutionCache::new(4);
        cache.put(
            "ghost",
            &Resolution::NotFound {
                name: "ghost".to_string(),
            },
        );
        assert!(cache.get("ghost").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = ResolutionCache::new(2);
        cache.put("a", &found("a"));
        cache.put("b", &found("b"));

        // Touch "a" so "b" is the eviction victim.
        assert!(cache.get("a").is_some());
        cache.put("c", &found("c"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_clear() {
        let cache = ResolutionCache::new(4);
        cache.put("a", &found("a"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let cache = ResolutionCache::new(0);
        cache.put("a", &found("a"));
        assert_eq!(cache.len(), 1);
    }
}
