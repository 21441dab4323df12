//! Dependency-graph classification.
//!
//! Builds a petgraph-backed view of a root package and its dependency
//! list, with each node carrying its pairing score and a parasitic flag.

use std::collections::{HashSet, VecDeque};

use log::warn;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use soul_core::error::Result;
use soul_core::similarity::PARASITIC_THRESHOLD;

use crate::service::ResolutionService;

/// One classified package in a dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub name: String,

    /// Pairing score; 0.0 when the package has no scored pairing.
    pub similarity: f64,

    /// True when the similarity sits below the parasitic threshold,
    /// including unresolved nodes.
    pub parasitic: bool,

    /// Whether any record was found for the name.
    pub resolved: bool,
}

/// A root-to-dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,

    /// Mean node similarity, 0.0 for an empty graph.
    pub average_coherence: f64,
}

/// A classified dependency graph in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub stats: GraphStats,
}

impl ResolutionService {
    /// Classifies `root` and its dependency list as a graph.
    ///
    /// Traversal is breadth-first over a FIFO queue so the root is
    /// classified before its dependencies whenever a name appears at both
    /// depths; a visited set keyed by name makes duplicates and cycles
    /// harmless. One node per visited package, one root-to-dependency
    /// edge per name visited at depth > 0.
    ///
    /// Unresolvable names still become nodes (similarity 0.0) so the
    /// graph shape mirrors the input. A failure local to one name skips
    /// that name; only a store failure aborts the build.
    pub fn build_graph(&self, root: &str, dependencies: &[String]) -> Result<DependencyGraph> {
        let mut graph: DiGraph<GraphNode, ()> = DiGraph::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut root_index: Option<NodeIndex> = None;

        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        queue.push_back((root.to_string(), 0));
        for dependency in dependencies {
            queue.push_back((dependency.clone(), 1));
        }

        while let Some((name, depth)) = queue.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }

            let node = match self.classify_node(&name) {
                Ok(node) => node,
                Err(err) if err.is_store_failure() => return Err(err),
                Err(err) => {
                    warn!("skipping {name} in dependency graph: {err}");
                    continue;
                }
            };

            let index = graph.add_node(node);
            if depth == 0 {
                root_index = Some(index);
            } else if let Some(root_index) = root_index {
                graph.add_edge(root_index, index, ());
            }
        }

        let nodes: Vec<GraphNode> = graph.node_weights().cloned().collect();
        let edges: Vec<GraphEdge> = graph
            .edge_indices()
            .filter_map(|edge| {
                let (from, to) = graph.edge_endpoints(edge)?;
                Some(GraphEdge {
                    from: graph[from].name.clone(),
                    to: graph[to].name.clone(),
                })
            })
            .collect();

        let average_coherence = if nodes.is_empty() {
            0.0
        } else {
            nodes.iter().map(|node| node.similarity).sum::<f64>() / nodes.len() as f64
        };
        let stats = GraphStats {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            average_coherence,
        };

        Ok(DependencyGraph {
            nodes,
            edges,
            stats,
        })
    }

    fn classify_node(&self, name: &str) -> Result<GraphNode> {
        let resolution = self.resolve(name)?;
        let resolved = resolution.is_found();
        let similarity = resolution.score().unwrap_or(0.0);

        Ok(GraphNode {
            name: name.to_string(),
            similarity,
            parasitic: similarity < PARASITIC_THRESHOLD,
            resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use soul_core::model::{FeatureVector, Namespace, TopologyMetrics};
    use soul_core::store::MemoryStore;

    use crate::convention::NamingConvention;
    use crate::service::ResolutionService;

    fn service() -> ResolutionService {
        ResolutionService::new(
            Arc::new(MemoryStore::new()),
            NamingConvention::default(),
            7,
            16,
        )
    }

    fn register_pair(svc: &ResolutionService, name: &str, values: [f64; 7]) {
        svc.register(
            name,
            Namespace::Npm,
            "1.0.0",
            FeatureVector::new(values.to_vec()),
            TopologyMetrics::default(),
        )
        .unwrap();
        svc.register(
            &format!("{name}-soul"),
            Namespace::Crate,
            "1.0.0",
            FeatureVector::new(values.to_vec()),
            TopologyMetrics::default(),
        )
        .unwrap();
    }

    #[test]
    fn test_graph_nodes_edges_and_coherence() {
        let svc = service();
        register_pair(&svc, "app", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        register_pair(&svc, "lib", [2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

        let graph = svc
            .build_graph("app", &["lib".to_string(), "ghost".to_string()])
            .unwrap();

        assert_eq!(graph.stats.node_count, 3);
        assert_eq!(graph.stats.edge_count, 2);

        // Root first, then dependencies in input order.
        assert_eq!(graph.nodes[0].name, "app");
        assert!(graph.nodes[0].resolved);
        assert_eq!(graph.nodes[0].similarity, 1.0);

        let ghost = graph.nodes.iter().find(|n| n.name == "ghost").unwrap();
        assert!(!ghost.resolved);
        assert!(ghost.parasitic);
        assert_eq!(ghost.similarity, 0.0);

        let expected = graph.nodes.iter().map(|n| n.similarity).sum::<f64>() / 3.0;
        assert!((graph.stats.average_coherence - expected).abs() < 1e-12);

        for edge in &graph.edges {
            assert_eq!(edge.from, "app");
        }
    }

    #[test]
    fn test_graph_dedupes_names() {
        let svc = service();
        register_pair(&svc, "app", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        let graph = svc
            .build_graph(
                "app",
                &["app".to_string(), "dep".to_string(), "dep".to_string()],
            )
            .unwrap();

        // Root consumed the "app" visit; "dep" appears once.
        assert_eq!(graph.stats.node_count, 2);
        assert_eq!(graph.stats.edge_count, 1);
        assert_eq!(graph.edges[0].to, "dep");
    }

    #[test]
    fn test_empty_graph_has_zero_coherence() {
        let svc = service();
        let graph = svc.build_graph("app", &[]).unwrap();

        // Unregistered root still yields one unresolved node.
        assert_eq!(graph.stats.node_count, 1);
        assert_eq!(graph.stats.edge_count, 0);
        assert_eq!(graph.stats.average_coherence, 0.0);
        assert!(!graph.nodes[0].resolved);
    }
}
