use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::model::PackageRecord;

use super::Store;

/// In-memory store backed by a `BTreeMap`, for tests and demos.
///
/// Iteration order is ascending key order, matching the SQLite adapter, so
/// scan-based operations behave identically against either backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, PackageRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, PackageRecord>>> {
        self.records
            .read()
            .map_err(|_| Error::StoreUnavailable("record map lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, PackageRecord>>> {
        self.records
            .write()
            .map_err(|_| Error::StoreUnavailable("record map lock poisoned".to_string()))
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<PackageRecord>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put(&self, key: &str, record: &PackageRecord) -> Result<()> {
        self.write()?.insert(key.to_string(), record.clone());
        Ok(())
    }

    fn iterate(&self) -> Result<Vec<(String, PackageRecord)>> {
        Ok(self
            .read()?
            .iter()
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.write()?.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureVector, Namespace, TopologyMetrics};

    fn record(name: &str) -> PackageRecord {
        PackageRecord::new(
            name,
            Namespace::Npm,
            "1.0.0",
            FeatureVector::new(vec![1.0, 2.0]),
            TopologyMetrics::default(),
        )
    }

    #[test]
    fn test_round_trip_and_delete() {
        let store = MemoryStore::new();
        let rec = record("left-pad");

        store.put("npm:left-pad", &rec).unwrap();
        assert_eq!(store.get("npm:left-pad").unwrap().unwrap(), rec);

        assert!(store.delete("npm:left-pad").unwrap());
        assert!(!store.delete("npm:left-pad").unwrap());
        assert!(store.get("npm:left-pad").unwrap().is_none());
    }

    #[test]
    fn test_iterate_in_key_order() {
        let store = MemoryStore::new();
        store.put("npm:b", &record("b")).unwrap();
        store.put("crate:a", &record("a")).unwrap();
        store.put("soul:0ff", &record("a")).unwrap();

        let keys: Vec<String> = store
            .iterate()
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["crate:a", "npm:b", "soul:0ff"]);
    }
}
