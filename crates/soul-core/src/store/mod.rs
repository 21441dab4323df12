//! Key-value store contract and adapters.
//!
//! Persistence is an external collaborator behind a minimal contract:
//! get, put, iterate, delete by namespaced string key. Two adapters ship
//! in-tree: a SQLite store for real deployments and an in-memory store
//! for tests and demos.

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::model::PackageRecord;

/// Minimal key-value contract the registry persists through.
///
/// Keys are namespaced strings: `npm:<name>`, `crate:<name>`, and
/// `soul:<phash>` for the content index. Implementations must be shareable
/// across threads behind an `Arc`.
pub trait Store: Send + Sync {
    /// Fetches the record stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<PackageRecord>>;

    /// Stores `record` under `key`, replacing any existing value.
    fn put(&self, key: &str, record: &PackageRecord) -> Result<()>;

    /// All stored `(key, record)` pairs, in ascending key order.
    ///
    /// Cost is O(N) in store size. Callers built on this (alternative
    /// discovery, registry stats) carry that as a documented scaling
    /// limit, acceptable at thousands of records.
    fn iterate(&self) -> Result<Vec<(String, PackageRecord)>>;

    /// Removes the record under `key`. Returns `false` when absent.
    fn delete(&self, key: &str) -> Result<bool>;
}
