//! Core domain model for the soul registry.
//!
//! This crate defines the package record model (namespaced names, feature
//! vectors, topology metrics), the similarity engine, the feature-extractor
//! contract, and the key-value store contract with its SQLite and in-memory
//! adapters.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod extract;
pub mod model;
pub mod similarity;
pub mod store;

pub use error::{Error, Result};
