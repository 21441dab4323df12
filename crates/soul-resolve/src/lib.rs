//! Resolution services for the soul registry.
//!
//! Implements the package-facing operations over a [`soul_core::store::Store`]:
//! resolve, alternative discovery, pairwise verification, batch
//! recommendation, and dependency-graph classification, plus the
//! configuration layer and the read-through resolution cache.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod cache;
pub mod config;
pub mod convention;
pub mod graph;
pub mod recommend;
pub mod service;

pub use cache::ResolutionCache;
pub use config::Config;
pub use convention::NamingConvention;
pub use graph::{DependencyGraph, GraphEdge, GraphNode, GraphStats};
pub use recommend::{RecommendationReport, ReplaceAdvice, UpgradeAdvice};
pub use service::{RegistryStats, ResolutionService, VerificationResult};
