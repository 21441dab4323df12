use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::model::PackageRecord;

use super::migrations::MIGRATIONS;
use super::Store;

/// SQLite-backed store.
///
/// A single connection behind a mutex: the registry is read-mostly and the
/// store contract is per-key, so connection-level serialization is
/// acceptable at the intended scale.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.apply_migrations()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::StoreUnavailable("connection mutex poisoned".to_string()))
    }

    fn apply_migrations(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        drop(stmt);

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                conn.execute_batch(migration.sql)?;
                conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<PackageRecord>> {
        let conn = self.lock()?;
        let body: Option<String> = conn
            .query_row("SELECT body FROM records WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, record: &PackageRecord) -> Result<()> {
        let body = serde_json::to_string(record)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO records (key, name, namespace, verified, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(key) DO UPDATE SET
                name = excluded.name,
                namespace = excluded.namespace,
                verified = excluded.verified,
                body = excluded.body,
                created_at = excluded.created_at",
            rusqlite::params![
                key,
                record.name,
                record.namespace.prefix(),
                i64::from(record.verified),
                body,
                record.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn iterate(&self) -> Result<Vec<(String, PackageRecord)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key, body FROM records ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (key, body) = row?;
            records.push((key, serde_json::from_str(&body)?));
        }
        Ok(records)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM records WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureVector, Namespace, TopologyMetrics};

    fn record(name: &str, namespace: Namespace) -> PackageRecord {
        PackageRecord::new(
            name,
            namespace,
            "1.0.0",
            FeatureVector::new(vec![1.0, 2.0, 3.0]),
            TopologyMetrics::new(2, 0.5, 0.4),
        )
    }

    #[test]
    fn test_open_in_memory_applies_migrations() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_put_get_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rec = record("left-pad", Namespace::Npm);

        store.put(&rec.key(), &rec).unwrap();

        let fetched = store.get("npm:left-pad").unwrap().unwrap();
        assert_eq!(fetched, rec);
        assert!(store.get("npm:missing").unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_existing() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = record("left-pad", Namespace::Npm);
        let mut second = record("left-pad", Namespace::Npm);
        second.version = "2.0.0".to_string();

        store.put("npm:left-pad", &first).unwrap();
        store.put("npm:left-pad", &second).unwrap();

        let fetched = store.get("npm:left-pad").unwrap().unwrap();
        assert_eq!(fetched.version, "2.0.0");
        assert_eq!(store.iterate().unwrap().len(), 1);
    }

    #[test]
    fn test_iterate_in_key_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.put("npm:b", &record("b", Namespace::Npm)).unwrap();
        store.put("crate:a", &record("a", Namespace::Crate)).unwrap();
        store.put("npm:a", &record("a", Namespace::Npm)).unwrap();

        let keys: Vec<String> = store
            .iterate()
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["crate:a", "npm:a", "npm:b"]);
    }

    #[test]
    fn test_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rec = record("left-pad", Namespace::Npm);
        store.put("npm:left-pad", &rec).unwrap();

        assert!(store.delete("npm:left-pad").unwrap());
        assert!(!store.delete("npm:left-pad").unwrap());
        assert!(store.get("npm:left-pad").unwrap().is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.db");
        let rec = record("serde", Namespace::Crate);

        {
            let store = SqliteStore::open(&path).unwrap();
            store.put("crate:serde", &rec).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let fetched = store.get("crate:serde").unwrap().unwrap();
        assert_eq!(fetched.name, "serde");
    }
}
